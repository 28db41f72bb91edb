// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::sync::Arc;

use crate::config::{Config, TriggerConfig};
use crate::engine::chain::TaskChain;
use crate::engine::hooks::{ChainHooks, NoHooks};
use crate::sync::Trigger;
use crate::traits::Task;

/// Assembles a [`TaskChain`] from a loaded [`Config`].
///
/// The chain takes its name from `chain.name`, and triggers minted through
/// [`ChainBuilder::trigger`] use `trigger.default_timeout_ms`.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use the_switchboard::config::Config;
/// use the_switchboard::engine::ChainBuilder;
/// use the_switchboard::tasks::FnTask;
/// use the_switchboard::traits::Task;
///
/// let builder = ChainBuilder::from_config(&Config::default());
/// let gate = builder.trigger();
/// gate.trigger();
///
/// let chain = builder
///     .then(Arc::new(FnTask::new("first", |_| Ok(()))), Some(gate))
///     .then(Arc::new(FnTask::new("second", |_| Ok(()))), None)
///     .build();
///
/// assert_eq!(chain.name(), "chain");
/// assert_eq!(chain.len(), 2);
/// ```
pub struct ChainBuilder<H = NoHooks> {
    name: String,
    triggers: TriggerConfig,
    chain: Vec<(Arc<dyn Task>, Option<Arc<Trigger>>)>,
    completion: Option<Arc<Trigger>>,
    hooks: H,
}

impl ChainBuilder<NoHooks> {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.chain.name.clone(),
            triggers: config.trigger.clone(),
            chain: Vec::new(),
            completion: None,
            hooks: NoHooks,
        }
    }
}

impl<H: ChainHooks> ChainBuilder<H> {
    /// Override the configured chain name.
    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Report terminal outcomes to `hooks`.
    pub fn hooks<H2: ChainHooks>(self, hooks: H2) -> ChainBuilder<H2> {
        ChainBuilder {
            name: self.name,
            triggers: self.triggers,
            chain: self.chain,
            completion: self.completion,
            hooks,
        }
    }

    /// Fire `trigger` when the built chain finishes.
    pub fn completion(mut self, trigger: Arc<Trigger>) -> Self {
        self.completion = Some(trigger);
        self
    }

    /// A fresh trigger with the configured default timeout.
    pub fn trigger(&self) -> Arc<Trigger> {
        Arc::new(Trigger::from_config(&self.triggers))
    }

    pub fn then(mut self, task: Arc<dyn Task>, trigger: Option<Arc<Trigger>>) -> Self {
        self.chain.push((task, trigger));
        self
    }

    pub fn build(self) -> TaskChain<H> {
        let mut chain = TaskChain::with_hooks(self.name, self.hooks);
        if let Some(trigger) = self.completion {
            chain = chain.with_completion(trigger);
        }
        for (task, trigger) in self.chain {
            chain.add_task(task, trigger);
        }
        chain
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backends::stub::CountingTask;
    use crate::config::{parse_config, ConfigFormat};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::{Duration, Instant};

    #[test]
    fn test_builder_uses_configured_name_and_timeout() {
        let yaml = r#"
chain:
  name: handshake
trigger:
  default_timeout_ms: 30
"#;
        let config = parse_config(yaml, ConfigFormat::Yaml).unwrap();
        let builder = ChainBuilder::from_config(&config);
        let gate = builder.trigger();
        assert_eq!(gate.timeout(), Some(Duration::from_millis(30)));

        let chain = builder
            .then(Arc::new(CountingTask::new("waits")), Some(gate))
            .build();
        assert_eq!(chain.name(), "handshake");

        let start = Instant::now();
        assert!(chain.execute().is_err());
        assert!(start.elapsed() >= Duration::from_millis(30));
        assert!(chain.timed_out());
    }

    #[test]
    fn test_builder_wires_hooks_and_completion() {
        #[derive(Default)]
        struct Flag(AtomicBool);
        impl ChainHooks for Flag {
            fn on_task_completed(&self) {
                self.0.store(true, Ordering::SeqCst);
            }
        }

        let done = Arc::new(Trigger::new());
        let chain = ChainBuilder::from_config(&Config::default())
            .named("custom")
            .hooks(Flag::default())
            .completion(Arc::clone(&done))
            .then(Arc::new(CountingTask::new("only")), None)
            .build();

        chain.execute().unwrap();

        assert_eq!(chain.name(), "custom");
        assert!(chain.hooks().0.load(Ordering::SeqCst));
        assert!(done.triggered());
    }
}
