//! Pre-built rule sets for the date sub-types, and per-call overrides of them.
//!
//! The presets are built once through `build_rules` and never mutated;
//! `create_date_options` works on a clone.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::exclusive::{get_exclusive, ExclusiveOptions};
use crate::filter_type::FilterType;
use crate::rule::{build_rule, build_rules, RuleFields, RuleMap, RuleSchema};

struct DatePresets {
    weekdays: Vec<RuleSchema>,
    weekends: Vec<RuleSchema>,
    day_of_week: Vec<RuleSchema>,
    basic: Vec<RuleSchema>,
}

static PRESETS: Lazy<Result<DatePresets>> = Lazy::new(build_presets);

fn build_presets() -> Result<DatePresets> {
    let weekdays = build_rules(
        FilterType::DateDaysWeekdays,
        &RuleMap::new()
            .with("monday", "Monday")
            .with("tuesday", "Tuesday")
            .with("wednesday", "Wednesday")
            .with("thursday", "Thursday")
            .with("friday", "Friday"),
    )?;
    let weekends = build_rules(
        FilterType::DateDaysWeekends,
        &RuleMap::new()
            .with("saturday", "Saturday")
            .with("sunday", "Sunday"),
    )?;
    let day_of_week: Vec<RuleSchema> = weekends.iter().chain(&weekdays).cloned().collect();
    let basic = build_rules(
        FilterType::DateBasic,
        &RuleMap::new()
            .with("custom-date", RuleFields::text("Custom date").separator())
            .with(
                "day-of-week",
                RuleFields::text("Day").children(day_of_week.clone()),
            )
            .with("today", "Today")
            .with("tomorrow", "Tomorrow")
            .with("yesterday", "Yesterday"),
    )?;

    Ok(DatePresets {
        weekdays,
        weekends,
        day_of_week,
        basic,
    })
}

fn presets() -> Result<&'static DatePresets> {
    Lazy::force(&PRESETS).as_ref().map_err(Clone::clone)
}

pub fn weekday_options() -> Result<Vec<RuleSchema>> {
    Ok(presets()?.weekdays.clone())
}

pub fn weekend_options() -> Result<Vec<RuleSchema>> {
    Ok(presets()?.weekends.clone())
}

/// Weekend days followed by weekdays.
pub fn day_of_week_options() -> Result<Vec<RuleSchema>> {
    Ok(presets()?.day_of_week.clone())
}

pub fn basic_date_options() -> Result<Vec<RuleSchema>> {
    Ok(presets()?.basic.clone())
}

/// The preset table for a date sub-type, or `None` for types without one.
pub fn date_filter_options(filter_type: FilterType) -> Result<Option<&'static [RuleSchema]>> {
    let presets = presets()?;
    Ok(match filter_type {
        FilterType::DateBasic => Some(presets.basic.as_slice()),
        FilterType::DateDays => Some(presets.day_of_week.as_slice()),
        FilterType::DateDaysWeekdays => Some(presets.weekdays.as_slice()),
        FilterType::DateDaysWeekends => Some(presets.weekends.as_slice()),
        _ => None,
    })
}

/// Arguments of `create_date_options`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateOptions {
    pub filter_type: FilterType,
    pub include: Vec<String>,
    pub omit: Vec<String>,
    pub rules: Option<RuleMap>,
}

impl DateOptions {
    pub fn new(filter_type: FilterType) -> Self {
        Self {
            filter_type,
            include: Vec::new(),
            omit: Vec::new(),
            rules: None,
        }
    }

    pub fn include<I, S>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.include.extend(ops.into_iter().map(Into::into));
        self
    }

    pub fn omit<I, S>(mut self, ops: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.omit.extend(ops.into_iter().map(Into::into));
        self
    }

    pub fn rules(mut self, rules: RuleMap) -> Self {
        self.rules = Some(rules);
        self
    }
}

/// Serializable view used by front ends that ship the options over the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateOptionsResult {
    #[serde(rename = "filterType")]
    pub filter_type: FilterType,
    pub rules: Vec<RuleSchema>,
}

/// The preset rules for `options.filter_type`, limited to the effective
/// include/omit set and with caller overrides applied.
///
/// An override replaces the preset entry with the same `value`. Overrides for
/// operators outside the effective set, for operators without a preset entry,
/// or with a missing or empty value are ignored.
pub fn create_date_options(options: &DateOptions) -> Result<Vec<RuleSchema>> {
    let filter_type = options.filter_type;
    let presets = date_filter_options(filter_type)?.ok_or_else(|| {
        Error::config(
            "create_date_options",
            format!("No date options exist for filter type \"{filter_type}\""),
        )
    })?;

    let exclusive = get_exclusive(&ExclusiveOptions {
        filter_type: filter_type.to_string(),
        include: options.include.clone(),
        omit: options.omit.clone(),
    })?;

    let mut current: Vec<RuleSchema> = presets
        .iter()
        .filter(|rule| exclusive.iter().any(|op| *op == rule.value))
        .cloned()
        .collect();

    if let Some(rules) = &options.rules {
        for (operator, rule) in rules.iter() {
            if !exclusive.iter().any(|op| *op == operator) {
                #[cfg(feature = "tracing")]
                tracing::debug!(%filter_type, operator, "ignoring override outside the effective set");
                continue;
            }
            let Some(rule) = rule.filter(|rule| !rule.is_blank()) else {
                continue;
            };
            if let Some(slot) = current.iter_mut().find(|r| r.value == operator) {
                *slot = build_rule(filter_type, operator, rule);
            }
        }
    }

    Ok(current)
}
