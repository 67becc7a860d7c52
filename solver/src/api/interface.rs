use std::time::Duration;

use eyre::WrapErr;

use super::types::{MoveOutcome, MoveRequest, Surroundings};
use crate::maze::Relative;

/// blind movement interface: the mouse never learns where it is
#[allow(async_fn_in_trait)]
pub trait MouseApi {
    /// walls around the current cell, relative to the current facing
    async fn surroundings(&self) -> eyre::Result<Surroundings>;

    /// on success the mouse advances one cell and turns to face that way
    async fn move_mouse(&self, direction: Relative) -> eyre::Result<MoveOutcome>;

    /// back to (0, 0) facing north
    async fn reset(&self) -> eyre::Result<()>;
}

/// named mouse on a remote maze server
pub struct HttpMouse {
    client: reqwest::Client,
    base_url: String,
    name: String,
}

impl HttpMouse {
    pub fn new(base_url: &str, name: &str, timeout: Duration) -> eyre::Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .wrap_err("failed to build http client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            name: name.to_string(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    fn endpoint(&self, action: &str) -> String {
        format!("{}/mouse/{}/{}", self.base_url, self.name, action)
    }
}

impl MouseApi for HttpMouse {
    async fn surroundings(&self) -> eyre::Result<Surroundings> {
        let walls = self
            .client
            .get(self.endpoint("surroundings"))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .wrap_err("surroundings request failed")?
            .json::<Surroundings>()
            .await
            .wrap_err("malformed surroundings response")?;
        Ok(walls)
    }

    async fn move_mouse(&self, direction: Relative) -> eyre::Result<MoveOutcome> {
        let outcome = self
            .client
            .post(self.endpoint("move"))
            .json(&MoveRequest { direction })
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .wrap_err_with(|| format!("move {} request failed", direction))?
            .json::<MoveOutcome>()
            .await
            .wrap_err("malformed move response")?;
        Ok(outcome)
    }

    async fn reset(&self) -> eyre::Result<()> {
        self.client
            .post(self.endpoint("reset"))
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .wrap_err("reset request failed")?;
        Ok(())
    }
}
