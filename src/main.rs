// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

#[cfg(unix)]
fn main() -> anyhow::Result<()> {
    demo::run()
}

#[cfg(not(unix))]
fn main() -> anyhow::Result<()> {
    anyhow::bail!("the switchboard demo serves on a Unix domain socket and needs a Unix target")
}

/// Request/reply round trip through a local socket server.
#[cfg(unix)]
mod demo {
    use anyhow::Context;
    use std::env;
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use the_switchboard::backends::socket::{LocalSocketServer, SocketRequest, RESPONSE_KEY};
    use the_switchboard::config::load_and_validate_config;
    use the_switchboard::engine::{ChainBuilder, ChainEvent};
    use the_switchboard::observability::init_tracing;
    use the_switchboard::store::TypedStore;
    use the_switchboard::tasks::{AsyncTask, FnTask};
    use the_switchboard::traits::Task;

    const REPLY_KEY: &str = "reply";

    pub fn run() -> anyhow::Result<()> {
        let args: Vec<String> = env::args().collect();

        if args.len() != 3 {
            eprintln!("Usage: {} <config.yaml|config.toml> <message>", args[0]);
            eprintln!("Example: {} configs/demo.yaml \"hello world\"", args[0]);
            std::process::exit(1);
        }

        let config_file = &args[1];
        let message = &args[2];

        let config = load_and_validate_config(config_file)
            .with_context(|| format!("Failed to load configuration '{}'", config_file))?;
        init_tracing(&config.logging);

        println!("🔌 Switchboard Request/Reply Demo");
        println!("═══════════════════════════════════");
        println!("📋 Configuration: {}", config_file);
        println!("🔗 Chain: {}", config.chain.name);
        println!("📡 Socket: {}", config.socket.path.display());
        println!("✉️  Message: \"{}\"", message);
        println!();

        // jobs block on this runtime from the main thread, so it needs its own workers
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .context("Failed to start tokio runtime")?;

        let server = runtime.block_on(LocalSocketServer::from_config(
            &config.socket,
            |request: &[u8]| request.to_ascii_uppercase(),
        ))?;

        let builder = ChainBuilder::from_config(&config);
        let replied = builder.trigger();

        let request = Arc::new(
            AsyncTask::new(
                SocketRequest::from_config(&config.socket, message.as_bytes()),
                runtime.handle().clone(),
            )
            .with_completion(Arc::clone(&replied)),
        );

        let report = {
            let request = Arc::clone(&request);
            FnTask::new("report", move |out| {
                let result = request
                    .get(Duration::ZERO)
                    .context("Socket request finished without a result")?;
                let bytes = result.get::<Vec<u8>, _>(RESPONSE_KEY)?;
                out.set(
                    REPLY_KEY.to_string(),
                    String::from_utf8_lossy(bytes).into_owned(),
                )?;
                Ok(())
            })
        };

        let mut chain = builder
            .then(request, Some(replied))
            .then(Arc::new(report), None)
            .build();
        chain.set_handle(|state| println!("🔔 Chain state: {} (code {})", state, state.code()));
        let _progress = chain.subscribe(|event| {
            if let ChainEvent::EntryCompleted { entry, task } = event {
                println!("  {}. {} ✓", entry + 1, task);
            }
        });

        let execution_start = Instant::now();
        let outcome = chain.execute();
        let execution_time = execution_start.elapsed();

        runtime.block_on(server.shutdown());

        println!("\n📊 Execution Results:");
        println!("⏱️  Execution Time: {:?}", execution_time);
        println!("🔢 Entries Executed: {}/{}", chain.executed_count(), chain.len());
        println!("🏁 Final State: {}", chain.state());

        outcome?;

        let results = chain
            .get(Duration::ZERO)
            .context("Finished chain has no results")?;
        let reply = results
            .get::<Arc<TypedStore>, _>("report")?
            .get::<String, _>(REPLY_KEY)?;

        println!("\n🎯 Round Trip:");
        println!("   Sent:     \"{}\"", message);
        println!("   Received: \"{}\"", reply);

        Ok(())
    }
}
