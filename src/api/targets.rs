//! Daily targets: `/macro-plan`, `/user/targets` and the local `dailyTarget`
//! record.

use crate::config;
use crate::context::SdkContext;
use crate::error::{NutriGuardError, Result};
use crate::models::{GoalTargets, MacroPlanInput, MacroPlanResponse, UserTargets};

pub struct TargetsApi<'a> {
    ctx: &'a SdkContext,
}

impl<'a> TargetsApi<'a> {
    pub fn new(ctx: &'a SdkContext) -> Self {
        Self { ctx }
    }

    /// Ask the backend for a macro plan and adopt it as the daily targets.
    ///
    /// The plan's targets are written to the local `dailyTarget` record and,
    /// when logged in, posted to `/user/targets`. The remote save is
    /// best-effort: its failure is logged and the plan is still returned.
    pub fn plan(&self, input: &MacroPlanInput) -> Result<MacroPlanResponse> {
        input.validate()?;
        let plan: MacroPlanResponse = self.ctx.api.post_json(config::MACRO_PLAN, input, None)?;
        tracing::info!(calories = plan.calories, bmr = plan.bmr, tdee = plan.tdee, "macro plan computed");

        let targets = plan.targets();
        self.save_local(&targets)?;
        if self.ctx.token().is_some() {
            if let Err(e) = self.save_remote(&targets) {
                tracing::warn!(error = %e, "failed to save targets to backend");
            }
        }
        Ok(plan)
    }

    /// Targets stored on this device, if any.
    pub fn local(&self) -> Option<UserTargets> {
        self.ctx.read_json(config::KEY_DAILY_TARGET)
    }

    pub fn save_local(&self, targets: &UserTargets) -> Result<()> {
        self.ctx.write_json(config::KEY_DAILY_TARGET, targets)
    }

    /// Targets stored server-side. `Ok(None)` if the user has none yet.
    pub fn fetch_remote(&self) -> Result<Option<UserTargets>> {
        let token = self.ctx.token().ok_or(NutriGuardError::NotLoggedIn)?;
        self.ctx
            .api
            .get_json_opt(config::USER_TARGETS, Some(&token))
    }

    pub fn save_remote(&self, targets: &UserTargets) -> Result<()> {
        let token = self.ctx.token().ok_or(NutriGuardError::NotLoggedIn)?;
        self.ctx
            .api
            .post_ack(config::USER_TARGETS, targets, Some(&token))?;
        Ok(())
    }

    /// Goals to measure progress against.
    ///
    /// Resolution order: the local record, then the backend (cached locally
    /// on success), then the built-in defaults. Never fails.
    pub fn goals(&self) -> GoalTargets {
        if let Some(local) = self.local() {
            return GoalTargets::from(&local);
        }
        if self.ctx.token().is_some() {
            match self.fetch_remote() {
                Ok(Some(remote)) => {
                    if let Err(e) = self.save_local(&remote) {
                        tracing::warn!(error = %e, "failed to cache backend targets locally");
                    }
                    return GoalTargets::from(&remote);
                }
                Ok(None) => tracing::debug!("no targets stored on backend"),
                Err(e) => tracing::warn!(error = %e, "failed to fetch targets; using defaults"),
            }
        }
        GoalTargets::default()
    }
}
