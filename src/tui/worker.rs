// SPDX-FileCopyrightText: 2026 Tripdeck Authors
// SPDX-License-Identifier: MIT

//! Background executor for backend calls.
//!
//! The UI loop is synchronous; planning requests run on a dedicated thread
//! that owns a tokio runtime. Requests go in through a channel, outcomes come
//! back as [`SessionEvent`]s the loop drains between frames. The session only
//! ever has one request in flight, so the worker handles them sequentially.

use std::sync::mpsc;
use std::thread;

use crate::model::{TripDetails, TripPlan};
use crate::service::PlannerClient;
use crate::session::{RequestToken, SessionEvent};

#[derive(Debug)]
pub(crate) enum Request {
    Warmup,
    Generate {
        token: RequestToken,
        details: TripDetails,
    },
    Complete {
        token: RequestToken,
        plan: Box<TripPlan>,
    },
}

pub(crate) struct Worker {
    requests: mpsc::Sender<Request>,
    events: mpsc::Receiver<SessionEvent>,
    thread: Option<thread::JoinHandle<()>>,
}

impl Worker {
    pub(crate) fn spawn(client: PlannerClient) -> std::io::Result<Self> {
        let (request_tx, request_rx) = mpsc::channel::<Request>();
        let (event_tx, event_rx) = mpsc::channel::<SessionEvent>();

        let thread = thread::Builder::new()
            .name("tripdeck-backend".to_owned())
            .spawn(move || serve(client, request_rx, event_tx))?;

        Ok(Self {
            requests: request_tx,
            events: event_rx,
            thread: Some(thread),
        })
    }

    pub(crate) fn submit(&self, request: Request) {
        if self.requests.send(request).is_err() {
            tracing::warn!("backend worker is gone; request dropped");
        }
    }

    pub(crate) fn try_next_event(&self) -> Option<SessionEvent> {
        self.events.try_recv().ok()
    }
}

impl Drop for Worker {
    fn drop(&mut self) {
        // Closing the request channel ends the serve loop.
        let (sender, _) = mpsc::channel();
        self.requests = sender;
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}

fn serve(client: PlannerClient, requests: mpsc::Receiver<Request>, events: mpsc::Sender<SessionEvent>) {
    let runtime = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            tracing::error!(error = %err, "failed to start backend runtime");
            return;
        }
    };

    while let Ok(request) = requests.recv() {
        let event = match request {
            Request::Warmup => {
                runtime.block_on(client.warmup());
                continue;
            }
            Request::Generate { token, details } => {
                let result = runtime.block_on(client.generate(&details));
                SessionEvent::GenerateFinished { token, result }
            }
            Request::Complete { token, plan } => {
                let result = runtime.block_on(client.complete_itinerary(&plan));
                SessionEvent::CompleteFinished { token, result }
            }
        };
        if events.send(event).is_err() {
            return;
        }
    }
}
