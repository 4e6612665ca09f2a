//! Aggregator — pure reductions over the current listing set.
//!
//! Everything here is deterministic and order-independent of recomputation
//! frequency: recomputing for an unchanged input yields identical output.

pub mod handlers;

use std::collections::{BTreeSet, HashMap};

use serde::Serialize;

use crate::models::job::JobListing;

/// Ranked lists are truncated to the top ten entries.
pub const TOP_N: usize = 10;

/// Histogram bin width in dollars.
pub const BIN_WIDTH: f64 = 25_000.0;
/// Midpoints at or above the ceiling land in the overflow bin.
pub const SALARY_CEILING: f64 = 250_000.0;

/// One ranked group (company or role) with its occurrence count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AggregateCount {
    pub name: String,
    pub count: u32,
}

/// One histogram bin, labeled by its dollar range in thousands.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalaryBin {
    pub range_label: String,
    pub count: u32,
}

/// Sorted unique values for filter dropdown population.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Facets {
    pub roles: Vec<String>,
    pub companies: Vec<String>,
    pub countries: Vec<String>,
}

/// Top hiring companies: exact-name counts, descending, ties ranked by
/// first appearance in the listing set.
pub fn top_companies(jobs: &[JobListing]) -> Vec<AggregateCount> {
    ranked_counts(jobs.iter().map(|j| j.company.as_str()))
}

/// Most in-demand roles, same ranking rules as `top_companies`.
pub fn in_demand_roles(jobs: &[JobListing]) -> Vec<AggregateCount> {
    ranked_counts(jobs.iter().map(|j| j.title.as_str()))
}

fn ranked_counts<'a>(names: impl Iterator<Item = &'a str>) -> Vec<AggregateCount> {
    // Insertion-ordered counting so a stable sort keeps first-seen ties first.
    let mut order: Vec<&str> = Vec::new();
    let mut counts: HashMap<&str, u32> = HashMap::new();
    for name in names {
        match counts.get_mut(name) {
            Some(count) => *count += 1,
            None => {
                order.push(name);
                counts.insert(name, 1);
            }
        }
    }

    let mut ranked: Vec<AggregateCount> = order
        .into_iter()
        .map(|name| AggregateCount {
            name: name.to_string(),
            count: counts[name],
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count));
    ranked.truncate(TOP_N);
    ranked
}

/// Salary midpoints for listings carrying both bounds. Listings with one or
/// neither bound are excluded here only — they stay in the raw listing set.
pub fn salary_midpoints(jobs: &[JobListing]) -> Vec<f64> {
    jobs.iter()
        .filter_map(|j| match (j.salary_min, j.salary_max) {
            (Some(min), Some(max)) => Some((min + max) / 2.0),
            _ => None,
        })
        .collect()
}

/// Partitions [0, 250000) into ten 25k-wide bins plus a "$250k+" overflow
/// bin. Each midpoint increments exactly one bin.
pub fn salary_histogram(midpoints: &[f64]) -> Vec<SalaryBin> {
    let bin_count = (SALARY_CEILING / BIN_WIDTH) as usize;

    let mut bins: Vec<SalaryBin> = (0..bin_count)
        .map(|i| {
            let start = (i as u32) * 25;
            SalaryBin {
                range_label: format!("${start}k-${}k", start + 24),
                count: 0,
            }
        })
        .collect();
    bins.push(SalaryBin {
        range_label: "$250k+".to_string(),
        count: 0,
    });

    for &midpoint in midpoints {
        // Casting a negative float saturates to 0, so junk salaries below
        // zero land in the first bin rather than panicking.
        let mut index = (midpoint / BIN_WIDTH).floor() as usize;
        if index >= bin_count {
            index = bin_count;
        }
        bins[index].count += 1;
    }

    bins
}

/// Sorted unique role titles, company names, and trailing location segments
/// (countries) across the listing set.
pub fn facets(jobs: &[JobListing]) -> Facets {
    let roles: BTreeSet<&str> = jobs.iter().map(|j| j.title.as_str()).collect();
    let companies: BTreeSet<&str> = jobs.iter().map(|j| j.company.as_str()).collect();
    let countries: BTreeSet<&str> = jobs
        .iter()
        .filter_map(|j| j.location.split(", ").nth(2))
        .filter(|c| !c.is_empty())
        .collect();

    Facets {
        roles: roles.into_iter().map(str::to_string).collect(),
        companies: companies.into_iter().map(str::to_string).collect(),
        countries: countries.into_iter().map(str::to_string).collect(),
    }
}
