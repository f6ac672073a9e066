//! Skill registry: routing table and help text.

use crate::command::Command;
use crate::reply::{HandlerResult, Responder};
use crate::skills::{MemecoinHandler, ModeHandler, SkillHandler, DIVIDER};
use std::sync::Arc;
use tracing::debug;

/// Declared type of a skill parameter.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ParamKind {
    #[default]
    String,
    Number,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
}

impl ParamSpec {
    pub fn string(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::String,
        }
    }

    pub fn number(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: ParamKind::Number,
        }
    }
}

/// One registered skill.
///
/// `skill` is the usage pattern, e.g. `/modetoken [address]`; bracketed
/// names are the positional parameters in order.
pub struct SkillDescriptor {
    pub skill: String,
    pub handler: Arc<dyn SkillHandler>,
    pub description: String,
    pub examples: Vec<String>,
    pub params: Vec<ParamSpec>,
}

impl SkillDescriptor {
    pub fn new(pattern: impl Into<String>, handler: Arc<dyn SkillHandler>) -> Self {
        Self {
            skill: pattern.into(),
            handler,
            description: String::new(),
            examples: Vec::new(),
            params: Vec::new(),
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.examples.push(example.into());
        self
    }

    pub fn param(mut self, spec: ParamSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Skill name without slash, e.g. `modetoken`.
    pub fn name(&self) -> &str {
        self.skill
            .split_whitespace()
            .next()
            .map(|s| s.trim_start_matches('/'))
            .unwrap_or_default()
    }

    /// Positional parameter names from the pattern.
    pub fn positional(&self) -> impl Iterator<Item = &str> {
        self.skill
            .split_whitespace()
            .skip(1)
            .filter_map(|t| t.strip_prefix('[')?.strip_suffix(']'))
    }
}

/// Static skill table, built once at startup.
pub struct SkillRegistry {
    descriptors: Vec<SkillDescriptor>,
}

impl SkillRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self {
            descriptors: Vec::new(),
        }
    }

    /// The bot's full skill set. The Mode skills share one handler.
    pub fn standard(mode: Arc<ModeHandler>, memecoin: Arc<MemecoinHandler>) -> Self {
        let mut registry = Self::new();
        let chain = memecoin.chain().to_string();

        registry.register(
            SkillDescriptor::new("/deploymeme [name] [symbol] [supply]", memecoin)
                .description(format!(
                    "Deploy a new memecoin on {} and announce the launch.",
                    chain
                ))
                .example("/deploymeme Doge2 DOGE2 1000000")
                .example("/deploymeme name=Doge2 symbol=DOGE2 supply=1000000")
                .param(ParamSpec::string("name"))
                .param(ParamSpec::string("symbol"))
                .param(ParamSpec::string("supply")),
        );
        registry.register(
            SkillDescriptor::new("/modestats", mode.clone())
                .description("Get current Mode network statistics")
                .example("/modestats"),
        );
        registry.register(
            SkillDescriptor::new("/modeblocks", mode.clone())
                .description("Get the latest Mode network blocks")
                .example("/modeblocks"),
        );
        registry.register(
            SkillDescriptor::new("/modetokens [query]", mode.clone())
                .description("Search tokens on Mode network")
                .example("/modetokens")
                .example("/modetokens query=weth")
                .param(ParamSpec::string("query")),
        );
        registry.register(
            SkillDescriptor::new("/modetransactions [limit]", mode.clone())
                .description("Get latest Mode network transactions")
                .example("/modetransactions")
                .example("/modetransactions limit=10")
                .param(ParamSpec::number("limit")),
        );
        registry.register(
            SkillDescriptor::new("/modetoken [address]", mode)
                .description("Get information about a token on Mode network")
                .example("/modetoken address=0xA2aa501b19aff244D90cc15a4Cf739D2725B5729")
                .param(ParamSpec::string("address")),
        );

        registry
    }

    pub fn register(&mut self, descriptor: SkillDescriptor) {
        debug!(skill = %descriptor.skill, handler = %descriptor.handler.name(), "Registered skill");
        self.descriptors.push(descriptor);
    }

    pub fn descriptors(&self) -> &[SkillDescriptor] {
        &self.descriptors
    }

    /// All descriptors registered under a skill name.
    pub fn find<'a>(&'a self, skill: &'a str) -> impl Iterator<Item = &'a SkillDescriptor> + 'a {
        self.descriptors.iter().filter(move |d| d.name() == skill)
    }

    pub fn contains(&self, skill: &str) -> bool {
        self.find(skill).next().is_some()
    }

    /// Declared parameter specs for a skill, across all its descriptors.
    pub fn param_specs<'a>(&'a self, skill: &'a str) -> impl Iterator<Item = &'a ParamSpec> + 'a {
        self.find(skill).flat_map(|d| d.params.iter())
    }

    /// Route a command to its handlers, in registration order, until one
    /// claims it. `None` means no handler recognised the skill.
    pub async fn dispatch(&self, command: &Command, out: &dyn Responder) -> Option<HandlerResult> {
        for descriptor in self.find(&command.skill) {
            if let Some(result) = descriptor.handler.handle(command, out).await {
                debug!(
                    skill = %command.skill,
                    handler = %descriptor.handler.name(),
                    code = result.code,
                    "Skill handled"
                );
                return Some(result);
            }
        }
        None
    }

    /// Help text generated from the registered descriptors.
    pub fn help_text(&self) -> String {
        let mut text = format!("🤖 Available Commands\n{}\n", DIVIDER);

        for descriptor in &self.descriptors {
            text.push_str(&format!("{}\n", descriptor.skill));
            if !descriptor.description.is_empty() {
                text.push_str(&format!("   {}\n", descriptor.description));
            }
            for example in &descriptor.examples {
                text.push_str(&format!("   e.g. {}\n", example));
            }
            text.push('\n');
        }

        text.push_str("/help\n   Show this message");
        text
    }
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::skills::testing::RecordingResponder;
    use async_trait::async_trait;

    /// Claims only the skills it is told about.
    struct FixedHandler {
        name: &'static str,
        claims: &'static [&'static str],
    }

    #[async_trait]
    impl SkillHandler for FixedHandler {
        fn name(&self) -> &str {
            self.name
        }

        async fn handle(&self, command: &Command, _out: &dyn Responder) -> Option<HandlerResult> {
            self.claims
                .contains(&command.skill.as_str())
                .then(|| HandlerResult::ok(self.name))
        }
    }

    #[test]
    fn test_descriptor_pattern_parsing() {
        let handler = Arc::new(FixedHandler { name: "a", claims: &[] });
        let descriptor = SkillDescriptor::new("/deploymeme [name] [symbol] [supply]", handler);

        assert_eq!(descriptor.name(), "deploymeme");
        assert_eq!(
            descriptor.positional().collect::<Vec<_>>(),
            vec!["name", "symbol", "supply"]
        );
    }

    #[test]
    fn test_dispatch_falls_through_to_next_handler() {
        let mut registry = SkillRegistry::new();
        registry.register(SkillDescriptor::new(
            "/shared",
            Arc::new(FixedHandler { name: "first", claims: &[] }),
        ));
        registry.register(SkillDescriptor::new(
            "/shared",
            Arc::new(FixedHandler { name: "second", claims: &["shared"] }),
        ));

        let out = RecordingResponder::default();
        let result = tokio_test::block_on(registry.dispatch(&Command::new("shared", "+1"), &out));

        assert_eq!(result, Some(HandlerResult::ok("second")));
    }

    #[test]
    fn test_dispatch_unknown_skill() {
        let registry = SkillRegistry::new();
        let out = RecordingResponder::default();

        let result = tokio_test::block_on(registry.dispatch(&Command::new("nope", "+1"), &out));
        assert!(result.is_none());
    }

    #[test]
    fn test_fan_in_shares_handler() {
        let shared: Arc<dyn SkillHandler> = Arc::new(FixedHandler {
            name: "shared",
            claims: &["one", "two"],
        });
        let mut registry = SkillRegistry::new();
        registry.register(SkillDescriptor::new("/one", shared.clone()));
        registry.register(SkillDescriptor::new("/two", shared.clone()));

        assert_eq!(Arc::strong_count(&shared), 3);
        assert!(registry.contains("one"));
        assert!(registry.contains("two"));
        assert!(!registry.contains("three"));
    }

    #[test]
    fn test_param_specs() {
        let mut registry = SkillRegistry::new();
        registry.register(
            SkillDescriptor::new(
                "/modetransactions [limit]",
                Arc::new(FixedHandler { name: "mode", claims: &[] }),
            )
            .param(ParamSpec::number("limit")),
        );

        let specs: Vec<_> = registry.param_specs("modetransactions").collect();
        assert_eq!(specs, vec![&ParamSpec::number("limit")]);
        assert_eq!(registry.param_specs("modestats").count(), 0);
    }

    #[test]
    fn test_help_text_lists_skills() {
        let mut registry = SkillRegistry::new();
        registry.register(
            SkillDescriptor::new(
                "/modetoken [address]",
                Arc::new(FixedHandler { name: "mode", claims: &[] }),
            )
            .description("Get information about a token on Mode network")
            .example("/modetoken address=0x1"),
        );

        let help = registry.help_text();
        assert!(help.starts_with("🤖 Available Commands\n"));
        assert!(help.contains("/modetoken [address]\n   Get information about a token on Mode network\n"));
        assert!(help.contains("   e.g. /modetoken address=0x1\n"));
        assert!(help.ends_with("/help\n   Show this message"));
    }
}
