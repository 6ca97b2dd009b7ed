use std::collections::HashMap;

use crate::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |var| vars.get(var).cloned()
}

#[test]
fn empty_environment_matches_default() {
    assert_eq!(TilingConfig::from_lookup(lookup(&[])), TilingConfig::default());
    assert_eq!(TilingConfig::builder().build(), TilingConfig::default());
}

#[test]
fn environment_overrides() {
    let config = TilingConfig::from_lookup(lookup(&[
        ("TESSEL_CONV_FALLBACK_ONLY", "1"),
        ("TESSEL_NO_KNOWLEDGE", "1"),
        ("TESSEL_DX_CORE_THRESHOLD", "0.5"),
        ("TESSEL_DW_CORE_THRESHOLD", "bogus"),
        ("TESSEL_DETERMINISTIC", "1"),
        ("TESSEL_NARROW_BF16", "1"),
    ]));
    assert_eq!(config.conv_strategy, ConvStrategy::FallbackOnly);
    assert!(!config.use_knowledge);
    assert_eq!(config.dx_core_used_threshold, 0.5);
    // unparsable values keep the default
    assert_eq!(config.dw_core_used_threshold, 0.8);
    assert!(config.deterministic);
    assert!(config.force_narrow_bf16);
}

#[test]
fn fallback_flag_zero_keeps_heuristic() {
    let config = TilingConfig::from_lookup(lookup(&[("TESSEL_CONV_FALLBACK_ONLY", "0")]));
    assert!(config.conv_strategy.is_heuristic());
}
