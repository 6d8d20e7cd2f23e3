//! Runtime bridge between UI command queue and backend event intake.

use std::{sync::Arc, thread, time::Duration};

use anyhow::Context;
use client_core::{
    locate, search_nearby, GeolocationProvider, IpGeolocation, MapDataService, OverpassClient,
    Settings,
};
use crossbeam_channel::{Receiver, Sender, TrySendError};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::UiEvent;

pub struct Services {
    map_data: Box<dyn MapDataService>,
    geolocation: Box<dyn GeolocationProvider>,
    overpass_timeout_secs: u32,
    geolocation_timeout: Duration,
}

impl Services {
    pub fn new(
        map_data: Box<dyn MapDataService>,
        geolocation: Box<dyn GeolocationProvider>,
        settings: &Settings,
    ) -> Self {
        Self {
            map_data,
            geolocation,
            overpass_timeout_secs: settings.overpass_timeout_secs,
            geolocation_timeout: settings.geolocation_timeout(),
        }
    }

    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let map_data =
            OverpassClient::from_settings(settings).context("failed to build map-data client")?;
        let geolocation = IpGeolocation::from_settings(settings)
            .context("failed to build geolocation client")?;
        Ok(Self::new(Box::new(map_data), Box::new(geolocation), settings))
    }

    pub async fn handle(&self, cmd: BackendCommand) -> UiEvent {
        match cmd {
            BackendCommand::Search { query } => UiEvent::SearchFinished {
                radius_m: query.radius_m(),
                outcome: search_nearby(self.map_data.as_ref(), &query, self.overpass_timeout_secs)
                    .await,
            },
            BackendCommand::Locate { at_startup } => UiEvent::Located {
                at_startup,
                outcome: locate(self.geolocation.as_ref(), self.geolocation_timeout).await,
            },
        }
    }
}

fn forward(ui_tx: &Sender<UiEvent>, event: UiEvent) {
    match ui_tx.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(_)) => tracing::warn!("ui event queue full; dropping event"),
        Err(TrySendError::Disconnected(_)) => tracing::debug!("ui closed before event delivery"),
    }
}

pub fn launch(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    thread::spawn(move || {
        let runtime = match tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
        {
            Ok(runtime) => runtime,
            Err(err) => {
                tracing::error!("failed to build backend runtime: {err}");
                forward(
                    &ui_tx,
                    UiEvent::BackendFailed(format!("Background worker failed to start: {err}")),
                );
                return;
            }
        };

        let services = match Services::from_settings(&settings) {
            Ok(services) => Arc::new(services),
            Err(err) => {
                tracing::error!("backend startup failed: {err:#}");
                forward(
                    &ui_tx,
                    UiEvent::BackendFailed(format!("Background worker failed to start: {err:#}")),
                );
                return;
            }
        };
        tracing::info!(overpass = %settings.overpass_url, "backend worker ready");

        while let Ok(cmd) = cmd_rx.recv() {
            let services = Arc::clone(&services);
            let ui_tx = ui_tx.clone();
            runtime.spawn(async move {
                let event = services.handle(cmd).await;
                forward(&ui_tx, event);
            });
        }
        tracing::info!("command queue closed; backend worker exiting");
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use client_core::{FixedPosition, GeolocationError, SearchError};
    use shared::{
        domain::{Coordinates, SearchQuery},
        protocol::OverpassResponse,
    };

    struct EmptyMap;

    #[async_trait]
    impl MapDataService for EmptyMap {
        async fn query(&self, _overpass_ql: &str) -> Result<OverpassResponse, SearchError> {
            Ok(OverpassResponse::default())
        }
    }

    fn services(position: Option<Coordinates>) -> Services {
        Services::new(
            Box::new(EmptyMap),
            Box::new(FixedPosition(position)),
            &Settings::default(),
        )
    }

    #[tokio::test]
    async fn search_command_reports_radius_and_outcome() {
        let query = SearchQuery::new(Coordinates::new(13.75, 100.5), 750, None, None)
            .expect("query");
        let event = services(None)
            .handle(BackendCommand::Search { query })
            .await;
        match event {
            UiEvent::SearchFinished { radius_m, outcome } => {
                assert_eq!(radius_m, 750);
                assert!(outcome.expect("search").is_empty());
            }
            _ => panic!("expected SearchFinished"),
        }
    }

    #[tokio::test]
    async fn locate_command_keeps_the_startup_flag() {
        let event = services(Some(Coordinates::new(13.75, 100.5)))
            .handle(BackendCommand::Locate { at_startup: true })
            .await;
        assert!(matches!(
            event,
            UiEvent::Located {
                at_startup: true,
                outcome: Ok(_)
            }
        ));

        let event = services(None)
            .handle(BackendCommand::Locate { at_startup: false })
            .await;
        assert!(matches!(
            event,
            UiEvent::Located {
                at_startup: false,
                outcome: Err(GeolocationError::Unsupported)
            }
        ));
    }
}
