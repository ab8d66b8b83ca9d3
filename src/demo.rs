//! The console demonstration run by the `settingcache` binary.
//!
//! Each scenario reads the shared rate, derives a setting for another member
//! and reads the shared rate again, printing the identity (`#<id>`) of every
//! object it touches so aliasing is visible in the output.

use anyhow::Result;
use rust_decimal::Decimal;
use settingcache_core::{DerivePolicy, Setting, SettingStore, SharedSetting};
use std::io::Write;
use tracing::info;

/// Profile the demonstration derives a setting for.
pub const DEMO_PROFILE: &str = "MemberB";

/// Rate the demonstration derives with: 0.003.
pub fn demo_rate() -> Decimal {
    Decimal::new(3, 3)
}

/// What one scenario observed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScenarioReport {
    pub policy: DerivePolicy,
    pub rate_before: Decimal,
    pub derived: Setting,
    pub rate_after: Decimal,
}

impl ScenarioReport {
    pub fn shared_rate_changed(&self) -> bool {
        self.rate_before != self.rate_after
    }
}

/// Runs both scenarios against `store`: mutate-in-place first, then, after
/// resetting and re-initializing the shared entry, copy-then-mutate.
pub fn run<W: Write>(store: &SettingStore, out: &mut W) -> Result<Vec<ScenarioReport>> {
    writeln!(out, "============ V1 ============")?;
    writeln!(out)?;
    store.initialize();
    let v1 = run_scenario(
        store,
        DerivePolicy::MutateInPlace,
        DEMO_PROFILE,
        demo_rate(),
        out,
    )?;

    writeln!(out, "============ V2 ============")?;
    writeln!(out)?;
    store.reset();
    store.initialize();
    let v2 = run_scenario(
        store,
        DerivePolicy::CopyThenMutate,
        DEMO_PROFILE,
        demo_rate(),
        out,
    )?;

    Ok(vec![v1, v2])
}

/// Reads the shared rate, derives with `policy`, reads the shared rate again.
pub fn run_scenario<W: Write>(
    store: &SettingStore,
    policy: DerivePolicy,
    profile_name: &str,
    rate: Decimal,
    out: &mut W,
) -> Result<ScenarioReport> {
    let rate_before = print_common_rate(store, out)?;

    let derived = match policy {
        DerivePolicy::MutateInPlace => {
            let shared = store.derive_mutating(profile_name, rate)?;
            writeln!(
                out,
                "derive_mutating identity, commonSetting: #{}",
                shared.identity()
            )?;
            shared.snapshot()
        }
        DerivePolicy::CopyThenMutate => {
            if let Some(shared) = store.get_cache_object() {
                writeln!(
                    out,
                    "derive_copying identity, commonSetting: #{}",
                    shared.identity()
                )?;
            }
            let fresh = SharedSetting::new(store.derive_copying(profile_name, rate)?);
            writeln!(
                out,
                "derive_copying identity, newSetting: #{}",
                fresh.identity()
            )?;
            fresh.snapshot()
        }
    };
    writeln!(out, "New Setting. {}", derived)?;
    writeln!(out)?;

    let rate_after = print_common_rate(store, out)?;

    let report = ScenarioReport {
        policy,
        rate_before,
        derived,
        rate_after,
    };
    info!(
        ?policy,
        %rate_before,
        %rate_after,
        changed = report.shared_rate_changed(),
        "scenario finished"
    );
    Ok(report)
}

fn print_common_rate<W: Write>(store: &SettingStore, out: &mut W) -> Result<Decimal> {
    match store.get_cache_object() {
        Some(shared) => writeln!(
            out,
            "common_rate identity, commonSetting: #{}",
            shared.identity()
        )?,
        None => writeln!(out, "common_rate identity, commonSetting: <absent>")?,
    }
    let rate = store.common_rate();
    writeln!(out, "Common Rate: {}", rate)?;
    writeln!(out)?;
    Ok(rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_contrasts_policies() {
        let store = SettingStore::with_defaults();
        let mut out = Vec::new();

        let reports = run(&store, &mut out).unwrap();

        assert_eq!(reports.len(), 2);
        assert!(reports[0].shared_rate_changed());
        assert_eq!(reports[0].rate_after, demo_rate());
        assert!(!reports[1].shared_rate_changed());
        assert_eq!(reports[1].rate_after, Decimal::new(5, 3));
    }

    #[test]
    fn test_output_lines() {
        let store = SettingStore::with_defaults();
        let mut out = Vec::new();
        run(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let rates: Vec<&str> = text
            .lines()
            .filter(|line| line.starts_with("Common Rate: "))
            .collect();
        assert_eq!(
            rates,
            [
                "Common Rate: 0.005",
                "Common Rate: 0.003",
                "Common Rate: 0.005",
                "Common Rate: 0.005",
            ]
        );
        assert!(text.starts_with("============ V1 ============"));
        assert!(text.contains("============ V2 ============"));
        assert_eq!(
            text.matches("New Setting. ProfileName: MemberB, CurrencyId: TWD, Rate: 0.003")
                .count(),
            2
        );
        assert!(text.contains("derive_copying identity, newSetting: #"));
    }

    fn identities_of<'a>(text: &'a str, label: &str) -> Vec<&'a str> {
        text.lines()
            .filter(|line| line.contains(label))
            .filter_map(|line| line.rsplit(' ').next())
            .collect()
    }

    #[test]
    fn test_identities_distinguish_v1_and_v2_entries() {
        let store = SettingStore::with_defaults();
        let mut out = Vec::new();
        run(&store, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        let common = identities_of(&text, "identity, commonSetting:");
        assert_eq!(common.len(), 6);
        // Each version reads, derives and re-reads one cached object.
        assert!(common[..3].iter().all(|id| *id == common[0]));
        assert!(common[3..].iter().all(|id| *id == common[3]));
        // The entry installed after reset is not the V1 object.
        assert_ne!(common[0], common[3]);

        let fresh = identities_of(&text, "identity, newSetting:");
        assert_eq!(fresh.len(), 1);
        assert!(!common.contains(&fresh[0]));
    }

    #[test]
    fn test_scenario_on_empty_store_fails() {
        let store = SettingStore::with_defaults();
        let mut out = Vec::new();

        let result = run_scenario(
            &store,
            DerivePolicy::CopyThenMutate,
            DEMO_PROFILE,
            demo_rate(),
            &mut out,
        );

        assert!(result.is_err());
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("<absent>"));
    }
}
