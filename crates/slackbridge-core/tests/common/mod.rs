#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use slackbridge_core::{Router, RouterConfig};
use slackbridge_terminal::{SessionHost, SessionRegistry};

pub const ALLOWED_USER: &str = "U_ALLOWED";
pub const OTHER_USER: &str = "U_OTHER";
pub const DEFAULT_SESSION: &str = "claude";

/// A host command observed by the fake
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    List,
    Has(String),
    Literal(String, String),
    Commit(String),
    Capture(String),
}

/// In-memory session host that records every command it receives
#[derive(Default)]
pub struct FakeHost {
    sessions: Mutex<Vec<String>>,
    screens: Mutex<HashMap<String, String>>,
    calls: Mutex<Vec<HostCall>>,
    down: bool,
}

impl FakeHost {
    pub fn with_sessions(names: &[&str]) -> Arc<Self> {
        Arc::new(Self {
            sessions: Mutex::new(names.iter().map(|n| n.to_string()).collect()),
            ..Default::default()
        })
    }

    /// A host whose server is not running at all
    pub fn down() -> Arc<Self> {
        Arc::new(Self {
            down: true,
            ..Default::default()
        })
    }

    pub fn set_screen(&self, name: &str, screen: &str) {
        self.screens
            .lock()
            .unwrap()
            .insert(name.to_string(), screen.to_string());
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    /// (session, text) pairs typed literally
    pub fn sent(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Literal(session, text) => Some((session, text)),
                _ => None,
            })
            .collect()
    }

    pub fn captures(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::Capture(session) => Some(session),
                _ => None,
            })
            .collect()
    }

    pub fn list_count(&self) -> usize {
        self.calls()
            .iter()
            .filter(|call| **call == HostCall::List)
            .count()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn check_up(&self) -> Result<()> {
        if self.down {
            Err(anyhow!("no server running on /tmp/tmux-1000/default"))
        } else {
            Ok(())
        }
    }
}

#[async_trait]
impl SessionHost for FakeHost {
    async fn list_sessions(&self) -> Result<Vec<String>> {
        self.record(HostCall::List);
        self.check_up()?;
        Ok(self.sessions.lock().unwrap().clone())
    }

    async fn has_session(&self, name: &str) -> Result<bool> {
        self.record(HostCall::Has(name.to_string()));
        self.check_up()?;
        Ok(self.sessions.lock().unwrap().iter().any(|s| s == name))
    }

    async fn send_literal(&self, name: &str, text: &str) -> Result<()> {
        self.record(HostCall::Literal(name.to_string(), text.to_string()));
        self.check_up()
    }

    async fn send_commit(&self, name: &str) -> Result<()> {
        self.record(HostCall::Commit(name.to_string()));
        self.check_up()
    }

    async fn capture_pane(&self, name: &str, _lines: usize) -> Result<String> {
        self.record(HostCall::Capture(name.to_string()));
        self.check_up()?;
        Ok(self
            .screens
            .lock()
            .unwrap()
            .get(name)
            .cloned()
            .unwrap_or_default())
    }

    fn host_name(&self) -> &str {
        "fake"
    }
}

pub fn router(host: &Arc<FakeHost>) -> Router {
    router_with_capacity(host, 256)
}

pub fn router_with_capacity(host: &Arc<FakeHost>, capacity: usize) -> Router {
    let mut config = RouterConfig::new(ALLOWED_USER, DEFAULT_SESSION);
    config.pending_capacity = capacity;
    Router::new(SessionRegistry::with_host(host.clone()), config)
}
