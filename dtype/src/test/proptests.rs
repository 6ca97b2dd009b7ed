pub mod generators;

#[cfg(test)]
mod accounting {
    use proptest::prelude::*;

    use super::generators::*;
    use crate::*;

    proptest! {
        #[test]
        fn block_holds_whole_elements(dtype in scalar_generator(), align in alignment_generator()) {
            let epb = dtype.elements_per_block(align);
            prop_assert!(epb >= 1);
            prop_assert_eq!(epb * dtype.element_bytes(), align.bytes());
        }

        #[test]
        fn aligned_down_never_grows(bytes in 0u64..(1 << 40), align in alignment_generator()) {
            let aligned = align.align_down(bytes);
            prop_assert!(aligned <= bytes);
            prop_assert_eq!(aligned % align.bytes() as u64, 0);
            prop_assert!(bytes - aligned < align.bytes() as u64);
        }

        #[test]
        fn reduce_key_implies_common_key(dtype in scalar_generator()) {
            if let Some(key) = dtype.reduce_tiling_key() {
                prop_assert_eq!(dtype.tiling_key(), Some(key));
            }
        }
    }
}
