use std::collections::HashMap;

use test_case::test_case;

use crate::*;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
    move |var| vars.get(var).cloned()
}

#[test_case(Soc::Ascend910B2, 24, 48)]
#[test_case(Soc::Ascend910B3, 20, 40)]
fn soc_presets(soc: Soc, cube: u32, vector: u32) {
    let budget = PlatformBudget::for_soc(soc);
    assert_eq!(budget.cube_cores, cube);
    assert_eq!(budget.vector_cores, vector);
    assert_eq!(budget.ub_bytes, 196_608);
    assert_eq!(budget.l1_bytes, 524_288);
    assert_eq!(budget.l0a_bytes, 65_536);
    assert_eq!(budget.l0b_bytes, 65_536);
    assert_eq!(budget.l0c_bytes, 131_072);
    assert!(budget.validate().is_ok());
}

#[test_case("910b2", Soc::Ascend910B2)]
#[test_case("Ascend910B2", Soc::Ascend910B2)]
#[test_case("910B3", Soc::Ascend910B3)]
fn soc_parsing(name: &str, expected: Soc) {
    assert_eq!(name.parse::<Soc>().unwrap(), expected);
}

#[test]
fn builder_defaults_match_910b3() {
    assert_eq!(PlatformBudget::builder().build(), PlatformBudget::ascend910b3());

    let budget = PlatformBudget::builder().cube_cores(8).ub_bytes(1024).build();
    assert_eq!(budget.cube_cores, 8);
    assert_eq!(budget.ub_bytes, 1024);
    assert_eq!(budget.vector_cores, 40);
}

#[test_case(PlatformBudget::builder().vector_cores(0).build(), "vector cores")]
#[test_case(PlatformBudget::builder().cube_cores(0).build(), "cube cores")]
#[test_case(PlatformBudget::builder().ub_bytes(0).build(), "UB bytes")]
#[test_case(PlatformBudget::builder().l1_bytes(0).build(), "L1 bytes")]
#[test_case(PlatformBudget::builder().l0c_bytes(0).build(), "L0C bytes")]
fn zero_resources_are_fatal(budget: PlatformBudget, expected: &str) {
    match budget.validate() {
        Err(Error::ZeroResource { resource }) => assert_eq!(resource, expected),
        other => panic!("expected ZeroResource, got {other:?}"),
    }
}

#[test]
fn env_defaults_to_910b3() {
    let budget = PlatformBudget::from_lookup(lookup(&[])).unwrap();
    assert_eq!(budget, PlatformBudget::ascend910b3());
}

#[test]
fn env_overrides() {
    let budget = PlatformBudget::from_lookup(lookup(&[
        ("TESSEL_SOC", "910b2"),
        ("TESSEL_CORE_NUM", "8"),
        ("TESSEL_UB_SIZE", "65536"),
    ]))
    .unwrap();
    assert_eq!(budget.cube_cores, 8);
    assert_eq!(budget.vector_cores, 16);
    assert_eq!(budget.ub_bytes, 65_536);
    assert_eq!(budget.l1_bytes, 524_288);
}

#[test]
fn env_rejects_unknown_soc() {
    let err = PlatformBudget::from_lookup(lookup(&[("TESSEL_SOC", "310p")])).unwrap_err();
    assert!(matches!(err, Error::UnknownSoc { ref name } if name == "310p"));
}

#[test]
fn env_rejects_garbage_and_zero() {
    let err = PlatformBudget::from_lookup(lookup(&[("TESSEL_CORE_NUM", "many")])).unwrap_err();
    assert!(matches!(err, Error::InvalidEnv { var: "TESSEL_CORE_NUM", .. }));

    let err = PlatformBudget::from_lookup(lookup(&[("TESSEL_CORE_NUM", "0")])).unwrap_err();
    assert!(matches!(err, Error::ZeroResource { .. }));
}
