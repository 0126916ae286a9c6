use crate::workflow::config::DriverConfig;
use anyhow::Context;
use pulsecore::prelude::ServiceResult;
use pulsecore::report::NormalizedReport;
use pulsecore::scan::{Resolution, ScanState, SubmissionController};
use pulsecore::service::{ImagePayload, ServiceClient};
use std::time::Duration;
use tokio::time::{self, MissedTickBehavior};

pub struct RunOutcome {
    pub resolution: Resolution,
    pub report: Option<NormalizedReport>,
    pub raw_body: Option<String>,
    pub error: Option<String>,
    pub frames: usize,
}

#[derive(Clone)]
pub struct Runner {
    client: ServiceClient,
    frame_interval: Duration,
}

impl Runner {
    pub fn new(config: DriverConfig) -> Self {
        Self {
            frame_interval: config.frame_interval(),
            client: ServiceClient::new(config.service),
        }
    }

    /// Submits `image` and calls `on_frame` with every scan snapshot until the
    /// service answers, then once more with the completed state.
    pub async fn analyze<F>(&self, image: ImagePayload, mut on_frame: F) -> anyhow::Result<RunOutcome>
    where
        F: FnMut(&ScanState),
    {
        let mut controller = SubmissionController::new();
        let id = controller
            .try_begin()
            .context("starting analysis on a fresh controller")?;

        let request = self.client.analyze(image);
        tokio::pin!(request);
        let mut ticker = time::interval(self.frame_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let mut frames = 0;
        let outcome = loop {
            tokio::select! {
                outcome = &mut request => break outcome,
                _ = ticker.tick() => {
                    if controller.on_frame() {
                        frames += 1;
                        on_frame(&controller.scan_state());
                    }
                }
            }
        };

        let resolution = controller.resolve(id, outcome);
        on_frame(&controller.scan_state());

        Ok(RunOutcome {
            resolution,
            report: controller.report().cloned(),
            raw_body: controller.raw_body().map(str::to_string),
            error: controller.error().map(str::to_string),
            frames,
        })
    }

    pub async fn send_feedback(&self, name: &str, message: &str) -> ServiceResult<()> {
        self.client.send_feedback(name, message).await
    }
}
