use crate::badges::BadgeLedger;
use crate::registry::SinkRegistry;
use crate::sink_trait::ProgressSink;
use habla_core::{BadgeAward, BadgeConfig, DrillEvent, SinkError};
use std::collections::HashMap;
use tokio::sync::mpsc;

struct Route {
    sink: Box<dyn ProgressSink>,
}

/// Routes drill events to the sinks registered for their session and keeps a
/// per-session badge ledger, synthesizing `Badge` events as thresholds are
/// crossed. Sink failures are logged, never fatal to the drill.
pub struct ProgressHost {
    registry: SinkRegistry,
    routes: HashMap<String, Vec<Route>>,
    badge_table: Vec<BadgeConfig>,
    event_rx: Option<mpsc::UnboundedReceiver<DrillEvent>>,
    task_handle: Option<tokio::task::JoinHandle<()>>,
}

impl ProgressHost {
    /// `badge_table` may be empty, in which case the built-in defaults apply.
    pub fn new(event_rx: mpsc::UnboundedReceiver<DrillEvent>, badge_table: Vec<BadgeConfig>) -> Self {
        Self {
            registry: SinkRegistry::new(),
            routes: HashMap::new(),
            badge_table,
            event_rx: Some(event_rx),
            task_handle: None,
        }
    }

    pub async fn add_route(
        &mut self,
        session_id: &str,
        plugin_name: &str,
        config: toml::Value,
    ) -> Result<(), SinkError> {
        let mut sink = self.registry.create(plugin_name)?;
        sink.initialize(config).await?;

        self.routes
            .entry(session_id.to_string())
            .or_default()
            .push(Route { sink });

        Ok(())
    }

    pub fn start(&mut self) {
        let mut rx = self
            .event_rx
            .take()
            .expect("start() called but receiver already taken");
        let routes = std::mem::take(&mut self.routes);
        let badge_table = std::mem::take(&mut self.badge_table);

        let handle = tokio::spawn(async move {
            let mut ledgers: HashMap<String, BadgeLedger> = HashMap::new();

            while let Some(event) = rx.recv().await {
                deliver(&routes, &event).await;

                // Correct answers feed the session's badge ledger; crossings
                // go to the same routes as the answer that earned them.
                if let DrillEvent::Graded(graded) = &event {
                    if graded.correct {
                        let ledger = ledgers
                            .entry(graded.session_id.clone())
                            .or_insert_with(|| BadgeLedger::new(badge_table.clone()));
                        for badge in ledger.record_correct() {
                            let award = DrillEvent::Badge(BadgeAward {
                                session_id: graded.session_id.clone(),
                                badge_id: badge.id,
                                badge_name: badge.name,
                                threshold: badge.threshold,
                                timestamp: graded.timestamp,
                            });
                            deliver(&routes, &award).await;
                        }
                    }
                }
            }
        });

        self.task_handle = Some(handle);
    }

    pub async fn shutdown(&mut self) {
        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
    }
}

async fn deliver(routes: &HashMap<String, Vec<Route>>, event: &DrillEvent) {
    if let Some(session_routes) = routes.get(event.session_id()) {
        for route in session_routes {
            if let Err(e) = route.sink.record(event).await {
                tracing::error!(
                    session_id = %event.session_id(),
                    sink = %route.sink.name(),
                    "record failed: {e}"
                );
            }
        }
    }
}
