//! Slash-command parsing and parameter access.

use crate::registry::{ParamKind, ParamSpec, SkillRegistry};
use std::collections::BTreeMap;
use std::fmt;
use tracing::debug;

/// A single parameter value after schema coercion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Text(String),
    Number(i64),
}

impl ParamValue {
    /// Coerce a raw token according to the declared kind. Numbers that do
    /// not parse are kept as text.
    pub fn coerce(raw: &str, kind: ParamKind) -> Self {
        match kind {
            ParamKind::Number => raw
                .parse::<i64>()
                .map(ParamValue::Number)
                .unwrap_or_else(|_| ParamValue::Text(raw.to_string())),
            ParamKind::String => ParamValue::Text(raw.to_string()),
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => f.write_str(s),
            ParamValue::Number(n) => write!(f, "{}", n),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Number(value)
    }
}

/// Named parameters of a command.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(BTreeMap<String, ParamValue>);

impl Params {
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<ParamValue>) {
        self.0.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.0.contains_key(name)
    }

    /// Value rendered as text, `None` when absent or blank.
    pub fn text(&self, name: &str) -> Option<String> {
        self.get(name)
            .map(|v| v.to_string().trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Value as an integer, parsing text values if needed.
    pub fn number(&self, name: &str) -> Option<i64> {
        match self.get(name)? {
            ParamValue::Number(n) => Some(*n),
            ParamValue::Text(s) => s.trim().parse().ok(),
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A parsed inbound command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Skill name without the leading slash, lowercased.
    pub skill: String,
    pub params: Params,
    /// Identity of the sender as reported by the transport.
    pub sender: String,
}

impl Command {
    pub fn new(skill: impl Into<String>, sender: impl Into<String>) -> Self {
        Self {
            skill: skill.into(),
            params: Params::default(),
            sender: sender.into(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.params.insert(name, value);
        self
    }

    /// Parse `/skill arg key=value ...`.
    ///
    /// `key=value` tokens set named parameters. Bare tokens fill the skill's
    /// positional parameters in pattern order; the last positional parameter
    /// absorbs any remaining words, and extends its named value when every
    /// positional was given by name. Values are coerced using the registry's
    /// parameter specs. Returns `None` when the text is not a command.
    pub fn parse(text: &str, sender: impl Into<String>, registry: &SkillRegistry) -> Option<Self> {
        let mut tokens = text.trim().strip_prefix('/')?.split_whitespace();
        let skill = tokens.next()?.to_lowercase();

        let specs: Vec<&ParamSpec> = registry.param_specs(&skill).collect();
        let kind_of = |name: &str| {
            specs
                .iter()
                .find(|spec| spec.name == name)
                .map(|spec| spec.kind)
                .unwrap_or_default()
        };
        let positional: Vec<&str> = registry
            .find(&skill)
            .next()
            .map(|d| d.positional().collect())
            .unwrap_or_default();

        let mut command = Command::new(skill.clone(), sender);
        let mut bare = Vec::new();

        for token in tokens {
            match token.split_once('=') {
                Some((name, raw)) if !name.is_empty() => {
                    command.params.insert(name, ParamValue::coerce(raw, kind_of(name)));
                }
                _ => bare.push(token),
            }
        }

        let open: Vec<&str> = positional
            .iter()
            .copied()
            .filter(|name| !command.params.contains(name))
            .collect();

        for (i, &name) in open.iter().enumerate() {
            let raw = if i + 1 == open.len() {
                bare.get(i..).map(|rest| rest.join(" "))
            } else {
                bare.get(i).map(|s| s.to_string())
            };

            if let Some(raw) = raw.filter(|r| !r.is_empty()) {
                command.params.insert(name, ParamValue::coerce(&raw, kind_of(name)));
            }
        }

        if open.is_empty() && !bare.is_empty() {
            let last = positional
                .last()
                .copied()
                .filter(|&name| kind_of(name) == ParamKind::String);

            match last {
                Some(name) => {
                    let mut value = command.params.text(name).unwrap_or_default();
                    for word in &bare {
                        if !value.is_empty() {
                            value.push(' ');
                        }
                        value.push_str(word);
                    }
                    command.params.insert(name, value);
                }
                None => debug!(skill = %command.skill, dropped = ?bare, "Ignoring extra words"),
            }
        }

        Some(command)
    }
}

/// Prompt returned when required parameters are missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingParams(pub String);

/// Typed parameters extracted from a command's parameter bag.
pub trait FromParams: Sized {
    fn from_params(params: &Params) -> Result<Self, MissingParams>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::{ParamSpec, SkillDescriptor};
    use crate::reply::{HandlerResult, Responder};
    use crate::skills::SkillHandler;
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NoopHandler;

    #[async_trait]
    impl SkillHandler for NoopHandler {
        fn name(&self) -> &str {
            "noop"
        }

        async fn handle(&self, _command: &Command, _out: &dyn Responder) -> Option<HandlerResult> {
            None
        }
    }

    fn registry() -> SkillRegistry {
        let handler: Arc<dyn SkillHandler> = Arc::new(NoopHandler);
        let mut registry = SkillRegistry::new();
        registry.register(
            SkillDescriptor::new("/deploymeme [name] [symbol] [supply]", handler.clone())
                .param(ParamSpec::string("name"))
                .param(ParamSpec::string("symbol"))
                .param(ParamSpec::string("supply")),
        );
        registry.register(
            SkillDescriptor::new("/modetransactions [limit]", handler.clone())
                .param(ParamSpec::number("limit")),
        );
        registry.register(
            SkillDescriptor::new("/modetokens [query]", handler).param(ParamSpec::string("query")),
        );
        registry
    }

    #[test]
    fn test_not_a_command() {
        assert!(Command::parse("hello", "+1", &registry()).is_none());
        assert!(Command::parse("/", "+1", &registry()).is_none());
    }

    #[test]
    fn test_positional_params() {
        let cmd = Command::parse("/deploymeme Doge2 DOGE2 1000000", "+1", &registry()).unwrap();

        assert_eq!(cmd.skill, "deploymeme");
        assert_eq!(cmd.sender, "+1");
        assert_eq!(cmd.params.text("name").as_deref(), Some("Doge2"));
        assert_eq!(cmd.params.text("symbol").as_deref(), Some("DOGE2"));
        assert_eq!(cmd.params.text("supply").as_deref(), Some("1000000"));
    }

    #[test]
    fn test_named_params_and_number_coercion() {
        let cmd = Command::parse("/ModeTransactions limit=3", "+1", &registry()).unwrap();

        assert_eq!(cmd.skill, "modetransactions");
        assert_eq!(cmd.params.get("limit"), Some(&ParamValue::Number(3)));
    }

    #[test]
    fn test_invalid_number_stays_text() {
        let cmd = Command::parse("/modetransactions lots", "+1", &registry()).unwrap();

        assert_eq!(cmd.params.get("limit"), Some(&ParamValue::Text("lots".into())));
        assert_eq!(cmd.params.number("limit"), None);
    }

    #[test]
    fn test_named_and_positional_mix() {
        let cmd = Command::parse("/deploymeme symbol=DOGE2 Doge2 42", "+1", &registry()).unwrap();

        assert_eq!(cmd.params.text("name").as_deref(), Some("Doge2"));
        assert_eq!(cmd.params.text("symbol").as_deref(), Some("DOGE2"));
        assert_eq!(cmd.params.text("supply").as_deref(), Some("42"));
    }

    #[test]
    fn test_last_positional_absorbs_rest() {
        let cmd = Command::parse("/modetokens wrapped ether", "+1", &registry()).unwrap();
        assert_eq!(cmd.params.text("query").as_deref(), Some("wrapped ether"));
    }

    #[test]
    fn test_named_last_positional_keeps_extra_words() {
        let cmd = Command::parse("/modetokens query=wrapped ether", "+1", &registry()).unwrap();
        assert_eq!(cmd.params.text("query").as_deref(), Some("wrapped ether"));

        let cmd = Command::parse(
            "/deploymeme name=Doge2 symbol=DOGE2 supply=1 extra",
            "+1",
            &registry(),
        )
        .unwrap();
        assert_eq!(cmd.params.text("name").as_deref(), Some("Doge2"));
        assert_eq!(cmd.params.text("supply").as_deref(), Some("1 extra"));
    }

    #[test]
    fn test_extra_words_after_named_number_are_dropped() {
        let cmd = Command::parse("/modetransactions limit=3 more", "+1", &registry()).unwrap();

        assert_eq!(cmd.params.get("limit"), Some(&ParamValue::Number(3)));
        assert_eq!(cmd.params.len(), 1);
    }

    #[test]
    fn test_missing_positional_is_absent() {
        let cmd = Command::parse("/deploymeme Doge2", "+1", &registry()).unwrap();

        assert!(cmd.params.contains("name"));
        assert!(!cmd.params.contains("symbol"));
        assert!(!cmd.params.contains("supply"));
    }

    #[test]
    fn test_unknown_skill_keeps_named_params() {
        let cmd = Command::parse("/whatever a=1 b", "+1", &registry()).unwrap();

        assert_eq!(cmd.skill, "whatever");
        assert_eq!(cmd.params.text("a").as_deref(), Some("1"));
        assert_eq!(cmd.params.len(), 1);
    }
}
