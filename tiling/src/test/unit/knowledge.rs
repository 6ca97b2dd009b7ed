use tessel_dtype::ScalarDType;
use tessel_platform::PlatformBudget;
use test_case::test_case;

use crate::conv::knowledge::registry;
use crate::conv::*;
use crate::*;

#[test_case("16_20_8_64_64", &[16, 20, 8, 64, 64])]
#[test_case("0", &[0])]
fn shape_key_round_trip(text: &str, values: &[u64]) {
    let key: ShapeKey = text.parse().unwrap();
    assert_eq!(key.0, values);
    assert_eq!(key.to_string(), text);
}

#[test_case("1__2"; "empty part")]
#[test_case("1_x_2"; "not a number")]
#[test_case("-1"; "negative")]
fn shape_key_rejects(text: &str) {
    assert!(matches!(text.parse::<ShapeKey>(), Err(Error::InvalidAttr { field: "shape key", .. })));
}

#[test]
fn builtin_tables_are_loaded() {
    let registry = registry();
    for table in [KnowledgeTable::DxHalf, KnowledgeTable::DxFloat, KnowledgeTable::DxFloatBasic, KnowledgeTable::DwHalf]
    {
        for cores in [20, 24] {
            assert!(registry.builtin_len(table, cores) > 0, "{table} on {cores} cores");
        }
    }
    assert_eq!(registry.builtin_len(KnowledgeTable::DwHalf, 8), 0);
}

#[test]
fn dw_rows_fold_depth_into_batch() {
    let key: ShapeKey = "16_20_8_64_64_8_66_66_3_3_3_1_1_1_0_0_0_0_0_0_1_1_1".parse().unwrap();
    let plan = registry().lookup(KnowledgeTable::DwHalf, 20, &key).unwrap();
    assert_eq!(plan.dims.batch_dim, 20);
    assert_eq!(plan.dims.d_dim, 1);
    assert_eq!(plan.dims.core_num, 20);
    assert_eq!((plan.block.base_m, plan.block.base_k, plan.block.base_n), (128, 64, 256));
    assert!(plan.block.steps_nest());
}

/// The only test touching overrides; it uses a core count no built-in table has.
#[test]
fn overrides_shadow_and_clear() {
    const CORES: u32 = 7;
    let registry = registry();
    let args = Conv3dBackpropFilterArgs {
        x: TensorDesc::new(ScalarDType::Float16, [2, 4, 18, 18, 16]),
        x_storage: StorageFormat::Fractal,
        filter_size: TensorDesc::new(ScalarDType::Float16, [16, 16, 3, 3, 3]),
        filter_format: DataFormat::Ncdhw,
        out_backprop: TensorDesc::new(ScalarDType::Float16, [2, 2, 16, 16, 16]),
        attrs: Conv3dAttrs::builder().strides(vec![1; 5]).build(),
    };
    let key: ShapeKey = "2_2_1_16_16_1_18_18_3_3_3_1_1_1_0_0_0_0_0_0_1_1_1".parse().unwrap();
    let budget = PlatformBudget::builder().cube_cores(CORES).build();
    let config = TilingConfig::default();

    let searched = conv3d_backprop_filter(&args, &budget, &config).unwrap();
    assert!(registry.lookup(KnowledgeTable::DwHalf, CORES, &key).is_none());

    let mut plan = PrecomputedPlan { dims: ConvDimPlan::default(), block: ConvBlockPlan::default() };
    plan.dims = ConvDimPlan {
        batch_dim: 2,
        group_dim: 1,
        d_dim: 1,
        m_dim: 1,
        k_dim: 2,
        n_dim: 1,
        dk_dim: 1,
        core_num: 4,
        ..plan.dims
    };
    assert!(registry.register(KnowledgeTable::DwHalf, CORES, key.clone(), plan).is_none());
    assert_eq!(registry.register(KnowledgeTable::DwHalf, CORES, key.clone(), plan), Some(plan));
    assert_eq!(registry.lookup(KnowledgeTable::DwHalf, CORES, &key), Some(plan));

    let hit = conv3d_backprop_filter(&args, &budget, &config).unwrap();
    assert_eq!(hit.block_dim, 4);

    let ignored = conv3d_backprop_filter(&args, &budget, &TilingConfig::builder().use_knowledge(false).build()).unwrap();
    assert_eq!(ignored, searched);

    registry.clear_overrides();
    assert!(registry.lookup(KnowledgeTable::DwHalf, CORES, &key).is_none());
    assert_eq!(conv3d_backprop_filter(&args, &budget, &config).unwrap(), searched);
}
