/// WebSocket sessions for the live dashboard
///
/// Each connection is one dashboard session with its own criteria over the
/// shared store. Every selection change is answered with a freshly computed
/// dashboard.
use actix::prelude::*;
use actix_web_actors::ws;
use log::{info, warn};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::messages::{ClientMessage, ServerMessage};
use crate::session::Session;
use crate::store::RecordStore;

/// How often heartbeat pings are sent
const HEARTBEAT_INTERVAL: Duration = Duration::from_secs(5);
/// How long before lack of client response causes a timeout
const CLIENT_TIMEOUT: Duration = Duration::from_secs(10);

/// Shared state for all connections
pub struct AppState {
    pub store: Arc<RecordStore>,
}

impl AppState {
    pub fn new(store: Arc<RecordStore>) -> Self {
        Self { store }
    }

    pub fn new_session(&self) -> Session {
        Session::new(self.store.clone())
    }
}

/// WebSocket connection actor
pub struct DashboardWebSocket {
    hb: Instant,
    session: Session,
}

impl DashboardWebSocket {
    pub fn new(session: Session) -> Self {
        Self {
            hb: Instant::now(),
            session,
        }
    }

    fn hb(&self, ctx: &mut ws::WebsocketContext<Self>) {
        ctx.run_interval(HEARTBEAT_INTERVAL, |act, ctx| {
            if Instant::now().duration_since(act.hb) > CLIENT_TIMEOUT {
                warn!("dashboard client heartbeat failed, disconnecting");
                ctx.stop();
                return;
            }
            ctx.ping(b"");
        });
    }

    fn send(&self, msg: &ServerMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match serde_json::to_string(msg) {
            Ok(text) => ctx.text(text),
            Err(e) => warn!("failed to serialize server message: {}", e),
        }
    }

    fn send_dashboard(&self, ctx: &mut ws::WebsocketContext<Self>) {
        let response = ServerMessage::Dashboard {
            dashboard: self.session.dashboard(),
        };
        self.send(&response, ctx);
    }

    fn handle_client_message(&mut self, msg: ClientMessage, ctx: &mut ws::WebsocketContext<Self>) {
        match msg {
            ClientMessage::Options => {
                let response = ServerMessage::Options {
                    filters: self.session.options(),
                };
                self.send(&response, ctx);
            }

            ClientMessage::Select { column, values } => match self.session.select(column, values) {
                Ok(()) => self.send_dashboard(ctx),
                Err(e) => self.send(&ServerMessage::Error { message: e.to_string() }, ctx),
            },

            ClientMessage::Reset => {
                self.session.reset();
                self.send_dashboard(ctx);
            }

            ClientMessage::Dashboard => self.send_dashboard(ctx),
        }
    }
}

impl Actor for DashboardWebSocket {
    type Context = ws::WebsocketContext<Self>;

    fn started(&mut self, ctx: &mut Self::Context) {
        info!("dashboard session started");
        self.hb(ctx);
    }
}

impl StreamHandler<Result<ws::Message, ws::ProtocolError>> for DashboardWebSocket {
    fn handle(&mut self, msg: Result<ws::Message, ws::ProtocolError>, ctx: &mut Self::Context) {
        match msg {
            Ok(ws::Message::Ping(msg)) => {
                self.hb = Instant::now();
                ctx.pong(&msg);
            }
            Ok(ws::Message::Pong(_)) => {
                self.hb = Instant::now();
            }
            Ok(ws::Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(client_msg) => self.handle_client_message(client_msg, ctx),
                Err(e) => {
                    let response = ServerMessage::Error {
                        message: format!("Invalid message format: {}", e),
                    };
                    self.send(&response, ctx);
                }
            },
            Ok(ws::Message::Binary(_)) => {
                warn!("unexpected binary message");
            }
            Ok(ws::Message::Close(reason)) => {
                ctx.close(reason);
                ctx.stop();
            }
            _ => ctx.stop(),
        }
    }
}
