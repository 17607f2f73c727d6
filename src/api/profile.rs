//! `/user/profile`.

use crate::config;
use crate::context::SdkContext;
use crate::error::{NutriGuardError, Result};
use crate::models::Profile;

pub struct ProfileApi<'a> {
    ctx: &'a SdkContext,
}

impl<'a> ProfileApi<'a> {
    pub fn new(ctx: &'a SdkContext) -> Self {
        Self { ctx }
    }

    pub fn get(&self) -> Result<Profile> {
        let token = self.ctx.token().ok_or(NutriGuardError::NotLoggedIn)?;
        self.ctx.api.get_json(config::USER_PROFILE, Some(&token))
    }

    /// Save the fields present in `profile`; absent fields are left untouched
    /// server-side.
    pub fn save(&self, profile: &Profile) -> Result<()> {
        let token = self.ctx.token().ok_or(NutriGuardError::NotLoggedIn)?;
        self.ctx
            .api
            .post_ack(config::USER_PROFILE, profile, Some(&token))?;
        tracing::info!("profile saved");
        Ok(())
    }

    /// BMI from the stored profile. `Ok(None)` when height or weight is
    /// missing or unusable.
    pub fn bmi(&self) -> Result<Option<f64>> {
        Ok(self.get()?.bmi())
    }
}
