//! Daily metrics endpoints: `/metrics/save` and `/metrics/weekly-status`.

use serde::Serialize;

use crate::config;
use crate::context::SdkContext;
use crate::error::{NutriGuardError, Result};
use crate::models::{DailyTotals, DayStatus, NutritionLineItem, WeeklyStatusResponse};

#[derive(Debug, Serialize)]
struct DaySave<'a> {
    day: &'a str,
    nutrition: DayNutrition<'a>,
}

#[derive(Debug, Serialize)]
struct DayNutrition<'a> {
    items: &'a [NutritionLineItem],
    totals: &'a DailyTotals,
}

pub struct MetricsApi<'a> {
    ctx: &'a SdkContext,
}

impl<'a> MetricsApi<'a> {
    pub fn new(ctx: &'a SdkContext) -> Self {
        Self { ctx }
    }

    fn require_token(&self) -> Result<String> {
        self.ctx.token().ok_or(NutriGuardError::NotLoggedIn)
    }

    /// Post the nutrition recorded for `day` (`YYYY-MM-DD`).
    ///
    /// Returns the backend's acknowledgement body.
    pub fn save_day(
        &self,
        day: &str,
        items: &[NutritionLineItem],
        totals: &DailyTotals,
    ) -> Result<serde_json::Value> {
        let token = self.require_token()?;
        self.save_day_with_token(&token, day, items, totals)
    }

    pub(crate) fn save_day_with_token(
        &self,
        token: &str,
        day: &str,
        items: &[NutritionLineItem],
        totals: &DailyTotals,
    ) -> Result<serde_json::Value> {
        let body = DaySave {
            day,
            nutrition: DayNutrition { items, totals },
        };
        self.ctx.api.post_ack(config::METRICS_SAVE, &body, Some(token))
    }

    /// Goal outcome for each of the last seven days, as judged by the backend.
    pub fn weekly_status(&self) -> Result<Vec<DayStatus>> {
        let token = self.require_token()?;
        let resp: WeeklyStatusResponse = self
            .ctx
            .api
            .get_json(config::METRICS_WEEKLY_STATUS, Some(&token))?;
        Ok(resp.weekly_status)
    }
}
