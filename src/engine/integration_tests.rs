// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Integration tests running chains against a real local socket server.

use parking_lot::Mutex;
use std::sync::Arc;
use std::thread;
use std::time::Duration;
use tempfile::TempDir;
use tokio::runtime::{Builder, Runtime};

use crate::backends::socket::{LocalSocketServer, SocketRequest, RESPONSE_KEY};
use crate::config::{parse_config, ConfigFormat};
use crate::engine::{ChainBuilder, ChainEvent, TaskChain};
use crate::errors::TaskError;
use crate::sync::Trigger;
use crate::tasks::{AsyncTask, FnTask, TaskState};
use crate::traits::Task;

fn runtime() -> Runtime {
    Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime")
}

fn upper(request: &[u8]) -> Vec<u8> {
    request.to_ascii_uppercase()
}

#[test]
fn test_request_then_follow_up_reads_reply() {
    let rt = runtime();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("chain.sock");
    let server = rt
        .block_on(LocalSocketServer::bind(&path, upper))
        .expect("Failed to bind server");

    let replied = Arc::new(Trigger::with_timeout(Duration::from_secs(5)));
    let request = Arc::new(
        AsyncTask::new(SocketRequest::new(&path, "hello world"), rt.handle().clone())
            .with_completion(Arc::clone(&replied)),
    );

    let seen = Arc::new(Mutex::new(None));
    let follow_up = {
        let request = Arc::clone(&request);
        let seen = Arc::clone(&seen);
        FnTask::new("follow_up", move |out| {
            let reply = request
                .get(Duration::ZERO)
                .ok_or_else(|| anyhow::anyhow!("request produced no result"))?;
            let text = String::from_utf8(reply.get::<Vec<u8>, _>(RESPONSE_KEY)?.clone())?;
            *seen.lock() = Some(text.clone());
            out.set("echo".to_string(), text)?;
            Ok(())
        })
    };

    let mut chain = TaskChain::new("request-reply");
    chain
        .add_task(request, Some(replied))
        .add_task(Arc::new(follow_up), None);

    chain.execute().expect("Chain should finish");

    assert_eq!(chain.state(), TaskState::Finished);
    assert_eq!(chain.executed_count(), 2);
    assert_eq!(seen.lock().as_deref(), Some("HELLO WORLD"));

    let results = chain.get(Duration::ZERO).expect("Finished chain has results");
    let follow_up_result = results
        .get::<Arc<crate::store::TypedStore>, _>("follow_up")
        .expect("follow_up result present");
    assert_eq!(
        follow_up_result.try_get::<String, _>("echo").as_deref(),
        Some("HELLO WORLD")
    );

    rt.block_on(server.shutdown());
}

#[test]
fn test_unreachable_server_fails_chain_and_skips_rest() {
    let rt = runtime();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let request = AsyncTask::new(
        SocketRequest::new(dir.path().join("nobody.sock"), "ping"),
        rt.handle().clone(),
    );
    let after = Arc::new(FnTask::new("after", |_| Ok(())));

    let mut chain = TaskChain::new("unreachable");
    chain
        .add_task(Arc::new(request), None)
        .add_task(Arc::clone(&after) as Arc<dyn Task>, None);

    let err = chain.execute().expect_err("Chain should fail");

    assert!(matches!(
        err,
        TaskError::Failed { ref task, .. } if task == "socket_request"
    ));
    assert_eq!(chain.state(), TaskState::Failed);
    assert_eq!(after.state(), TaskState::Created);
}

#[test]
fn test_reply_signaled_by_server_handler() {
    // the server fires the gate itself, like a peer acknowledging out of band
    let rt = runtime();
    let dir = TempDir::new().expect("Failed to create temp dir");
    let path = dir.path().join("ack.sock");

    let acked = Arc::new(Trigger::with_timeout(Duration::from_secs(5)));
    let server = {
        let acked = Arc::clone(&acked);
        rt.block_on(LocalSocketServer::bind(&path, move |req: &[u8]| {
            acked.trigger();
            req.to_vec()
        }))
        .expect("Failed to bind server")
    };

    let mut chain = TaskChain::new("acked");
    chain.add_task(
        Arc::new(AsyncTask::new(
            SocketRequest::new(&path, "ack me"),
            rt.handle().clone(),
        )),
        Some(acked),
    );

    chain.execute().expect("Chain should finish");
    assert_eq!(chain.executed_count(), 1);

    rt.block_on(server.shutdown());
}

#[test]
fn test_configured_chain_times_out_without_signal() {
    let config = parse_config(
        r#"
[chain]
name = "configured"

[trigger]
default_timeout_ms = 40
"#,
        ConfigFormat::Toml,
    )
    .expect("Valid TOML");

    let builder = ChainBuilder::from_config(&config);
    let never = builder.trigger();
    let chain = builder
        .then(Arc::new(FnTask::new("lonely", |_| Ok(()))), Some(never))
        .then(Arc::new(FnTask::new("unreached", |_| Ok(()))), None)
        .build();

    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&events);
    let _subscription = chain.subscribe(move |event| sink.lock().push(event.clone()));

    let err = chain.execute().expect_err("Chain should time out");

    assert!(matches!(err, TaskError::TimedOut { entry: 0, .. }));
    assert_eq!(chain.state(), TaskState::Timeout);
    let events = events.lock();
    assert!(matches!(
        events.first(),
        Some(ChainEvent::Started { entries: 2 })
    ));
    assert!(matches!(
        events.last(),
        Some(ChainEvent::TimedOut { entry: 0 })
    ));
}

#[test]
fn test_chain_executed_on_worker_thread_observed_from_main() {
    let gate = Arc::new(Trigger::with_timeout(Duration::from_secs(5)));
    let mut chain = TaskChain::new("background");
    chain
        .add_task(Arc::new(FnTask::new("first", |_| Ok(()))), Some(Arc::clone(&gate)))
        .add_task(Arc::new(FnTask::new("second", |_| Ok(()))), None);
    let chain = Arc::new(chain);

    let worker = {
        let chain = Arc::clone(&chain);
        thread::spawn(move || chain.execute())
    };

    thread::sleep(Duration::from_millis(20));
    assert_eq!(chain.state(), TaskState::Executing);
    gate.trigger();

    worker
        .join()
        .expect("Worker panicked")
        .expect("Chain should finish");
    assert_eq!(chain.executed_count(), 2);
}
