use super::similarity::{normalize, similarity};
use crate::config::MatcherConfig;
use crate::model::MasterStore;

/// One way of spelling a directory entry, e.g. prefixed by its dispatch code.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantScore {
    pub label: &'static str,
    pub candidate: String,
    pub score: f64,
}

/// Full scoring trace for one (imported name, directory entry) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct PairScore {
    pub variants: Vec<VariantScore>,
    pub keyword_hit: bool,
    pub score: f64,
}

/// Best directory entry found for an imported name.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub index: usize,
    pub score: f64,
}

fn non_blank(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

/// Name variants compared against the imported name. Variants that need a
/// code or company the entry doesn't have are left out.
pub fn name_variants(master: &MasterStore) -> Vec<(&'static str, String)> {
    let name = master.store_name.trim();
    let dispatch = non_blank(&master.dispatch_code);
    let store_code = non_blank(&master.store_code);
    let company = non_blank(&master.store_company);

    let mut variants = vec![("name", name.to_string())];
    if let Some(dispatch) = dispatch {
        variants.push(("dispatch+name", format!("{} {}", dispatch, name)));
    }
    if let Some(code) = store_code {
        variants.push(("store_code+name", format!("{} {}", code, name)));
    }
    if let (Some(dispatch), Some(company)) = (dispatch, company) {
        variants.push((
            "dispatch+company+name",
            format!("{} {} {}", dispatch, company, name),
        ));
    }
    variants
}

/// True when the names contain one another, or the imported name carries
/// the entry's dispatch or store code verbatim.
pub fn keyword_hit(imported_name: &str, master: &MasterStore) -> bool {
    let imported = normalize(imported_name);
    if imported.is_empty() {
        return false;
    }

    let name = normalize(&master.store_name);
    if !name.is_empty() && (imported.contains(&name) || name.contains(&imported)) {
        return true;
    }

    [&master.dispatch_code, &master.store_code]
        .into_iter()
        .filter_map(non_blank)
        .any(|code| imported.contains(&code.to_lowercase()))
}

pub fn score_pair_detailed(
    imported_name: &str,
    master: &MasterStore,
    config: &MatcherConfig,
) -> PairScore {
    let variants: Vec<VariantScore> = name_variants(master)
        .into_iter()
        .map(|(label, candidate)| {
            let score = similarity(imported_name, &candidate, config);
            VariantScore {
                label,
                candidate,
                score,
            }
        })
        .collect();

    let mut score = variants.iter().map(|v| v.score).fold(0.0, f64::max);
    let keyword_hit = keyword_hit(imported_name, master);
    if keyword_hit {
        score = score.max(config.keyword_floor);
    }

    PairScore {
        variants,
        keyword_hit,
        score: score.clamp(0.0, 1.0),
    }
}

pub fn score_pair(imported_name: &str, master: &MasterStore, config: &MatcherConfig) -> f64 {
    score_pair_detailed(imported_name, master, config).score
}

/// Highest scoring entry. On ties the earliest entry wins, so callers that
/// need a stable answer must order `masters` first.
pub fn best_candidate(
    imported_name: &str,
    masters: &[MasterStore],
    config: &MatcherConfig,
) -> Option<Candidate> {
    let mut best: Option<Candidate> = None;
    for (index, master) in masters.iter().enumerate() {
        let score = score_pair(imported_name, master, config);
        match best {
            Some(current) if score <= current.score => {}
            _ => best = Some(Candidate { index, score }),
        }
    }
    best
}

pub fn is_accepted(score: f64, config: &MatcherConfig) -> bool {
    score >= config.threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(id: i64, name: &str, dispatch: Option<&str>, code: Option<&str>) -> MasterStore {
        MasterStore {
            dispatch_code: dispatch.map(str::to_string),
            store_code: code.map(str::to_string),
            ..MasterStore::named(id, name)
        }
    }

    #[test]
    fn test_name_variants_skip_missing_codes() {
        let bare = MasterStore::named(1, "Centra Naas");
        assert_eq!(name_variants(&bare).len(), 1);

        let full = MasterStore {
            store_company: Some("Musgrave".to_string()),
            ..store(2, "Centra Naas", Some("2040A"), Some("C-118"))
        };
        let variants = name_variants(&full);
        let labels: Vec<&str> = variants.iter().map(|(label, _)| *label).collect();
        assert_eq!(
            labels,
            vec!["name", "dispatch+name", "store_code+name", "dispatch+company+name"]
        );
        assert_eq!(variants[3].1, "2040A Musgrave Centra Naas");
    }

    #[test]
    fn test_blank_codes_are_ignored() {
        let master = store(1, "Centra Naas", Some("  "), Some(""));
        assert_eq!(name_variants(&master).len(), 1);
        assert!(!keyword_hit("Something else", &master));
    }

    #[test]
    fn test_keyword_hit_on_dispatch_code() {
        let master = store(1, "Circle K Gallowshill", Some("1001C"), None);
        assert!(keyword_hit("1001C Circle K - Gallowshill (30893)", &master));
        assert!(!keyword_hit("Circle K - Ballymun", &master));
    }

    #[test]
    fn test_keyword_floor_applies() {
        let config = MatcherConfig::default();
        let master = store(1, "Zzyzx", None, Some("30893"));
        let detailed = score_pair_detailed("Unrelated Depot (30893)", &master, &config);
        assert!(detailed.keyword_hit);
        assert_eq!(detailed.score, 0.4);
    }

    #[test]
    fn test_score_pair_is_pure() {
        let config = MatcherConfig::default();
        let master = store(7, "Applegreen Kilcullen", Some("3301"), None);
        let first = score_pair("3301 Applegreen - Kilcullen", &master, &config);
        for _ in 0..5 {
            assert_eq!(score_pair("3301 Applegreen - Kilcullen", &master, &config), first);
        }
    }

    #[test]
    fn test_best_candidate_first_max_wins() {
        let config = MatcherConfig::default();
        let masters = vec![
            MasterStore::named(5, "Topaz"),
            MasterStore::named(9, "Topaz"),
        ];
        let best = best_candidate("Topaz Cork", &masters, &config).unwrap();
        assert_eq!(best.index, 0);
        assert_eq!(best.score, 0.8);
    }

    #[test]
    fn test_best_candidate_empty_directory() {
        let config = MatcherConfig::default();
        assert!(best_candidate("Topaz Cork", &[], &config).is_none());
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let config = MatcherConfig::default();
        assert!(is_accepted(0.3, &config));
        assert!(!is_accepted(0.2999, &config));
    }
}
