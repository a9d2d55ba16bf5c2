//! Runs [`Command`]s off the UI thread.
//!
//! Each command becomes one tokio task; its [`Completion`] is sent back over
//! an unbounded channel that the event loop drains between frames. Nothing
//! is cancelled or serialized, so completions arrive in whatever order the
//! backend answers.

use tokio::runtime::Handle;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, warn};

use super::sync::{Command, Completion, Outcome, RequestId};
use crate::api::CustomerApi;

pub struct Dispatcher {
    api: CustomerApi,
    handle: Handle,
    tx: UnboundedSender<Completion>,
    next_request: u64,
}

impl Dispatcher {
    pub fn new(api: CustomerApi, handle: Handle, tx: UnboundedSender<Completion>) -> Self {
        Self {
            api,
            handle,
            tx,
            next_request: 0,
        }
    }

    /// Spawn `cmd` and return the id its completion will carry.
    pub fn dispatch(&mut self, cmd: Command) -> RequestId {
        self.next_request += 1;
        let request = RequestId(self.next_request);
        debug!(request = request.0, op = cmd.name(), "dispatching request");

        let api = self.api.clone();
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let op = cmd.name();
            let outcome = execute(&api, cmd).await;
            match outcome.failure() {
                Some(err) => warn!(request = request.0, op, error = %err, "request failed"),
                None => debug!(request = request.0, op, "request finished"),
            }
            // The receiver is gone once the UI has quit.
            let _ = tx.send(Completion { request, outcome });
        });

        request
    }

    pub fn dispatch_all(&mut self, cmds: impl IntoIterator<Item = Command>) {
        for cmd in cmds {
            self.dispatch(cmd);
        }
    }
}

/// Run one command against the backend.
pub async fn execute(api: &CustomerApi, cmd: Command) -> Outcome {
    match cmd {
        Command::FetchAll => Outcome::Listed(api.list_all().await),
        Command::Create(body) => Outcome::Created(api.create(&body).await),
        Command::Update(body) => Outcome::Updated(api.update(&body).await),
        Command::Delete(id) => Outcome::Deleted(api.delete(id).await),
        Command::Get(id) => Outcome::Fetched(api.get(&id).await),
    }
}
