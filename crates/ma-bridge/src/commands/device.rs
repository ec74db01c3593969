//! Device custody commands: wipe, ownership, admin status, carrier, lock.

use tracing::{info_span, Instrument};

use ma_app::usecases::{AdminStatus, SimInfo};

use super::dto::SuccessResponse;
use super::error::CommandError;
use crate::bootstrap::AgentRuntime;

/// Factory-reset the device. Failures are always reported.
pub async fn wipe(runtime: &AgentRuntime) -> Result<SuccessResponse, CommandError> {
    let span = info_span!("command.device.wipe");
    async {
        runtime.usecases().wipe_device().execute().await?;
        Ok(SuccessResponse::ok("Device wipe initiated"))
    }
    .instrument(span)
    .await
}

pub async fn get_sim_info(runtime: &AgentRuntime) -> Result<SimInfo, CommandError> {
    let span = info_span!("command.device.get_sim_info");
    async {
        runtime
            .usecases()
            .get_sim_info()
            .execute()
            .await
            .map_err(|e| CommandError::from(e).context("Failed to get SIM info"))
    }
    .instrument(span)
    .await
}

pub async fn get_admin_status(runtime: &AgentRuntime) -> AdminStatus {
    let span = info_span!("command.device.get_admin_status");
    runtime
        .usecases()
        .get_admin_status()
        .execute()
        .instrument(span)
        .await
}

pub async fn request_admin_elevation(
    runtime: &AgentRuntime,
) -> Result<SuccessResponse, CommandError> {
    let span = info_span!("command.device.request_admin_elevation");
    async {
        runtime
            .usecases()
            .request_admin_elevation()
            .execute()
            .await?;
        Ok(SuccessResponse::ok("Device admin requested"))
    }
    .instrument(span)
    .await
}

pub async fn release_ownership(runtime: &AgentRuntime) -> Result<SuccessResponse, CommandError> {
    let span = info_span!("command.device.release_ownership");
    async {
        runtime.usecases().release_ownership().execute().await?;
        Ok(SuccessResponse::ok("Device control released"))
    }
    .instrument(span)
    .await
}

pub async fn lock_device_now(runtime: &AgentRuntime) -> Result<SuccessResponse, CommandError> {
    let span = info_span!("command.device.lock_now");
    async {
        runtime.usecases().lock_device().execute().await?;
        Ok(SuccessResponse::ok("Device locked"))
    }
    .instrument(span)
    .await
}
