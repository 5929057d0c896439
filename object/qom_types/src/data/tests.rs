use super::*;
use pretty_assertions::assert_eq;

#[test]
fn zeroed_block_reads_zero() {
    let block = DataBlock::zeroed(16);
    assert_eq!(block.len(), 16);
    assert_eq!(block.read::<u64>(8), Ok(0));
}

#[test]
fn scalars_are_little_endian() {
    let mut block = DataBlock::zeroed(8);
    block.write(0, 0x2700u16).expect("in bounds");
    block.write(4, 0xDEAD_BEEFu32).expect("in bounds");

    assert_eq!(block.bytes(0, 2), Ok(&[0x00, 0x27][..]));
    assert_eq!(block.read::<u32>(4), Ok(0xDEAD_BEEF));
    assert_eq!(block.read::<u8>(4), Ok(0xEF));
}

#[test]
fn out_of_bounds_access_is_rejected() {
    let mut block = DataBlock::zeroed(6);
    assert_eq!(
        block.read::<u32>(4),
        Err(ObjectError::FieldOutOfBounds {
            offset: 4,
            len: 4,
            start: 0,
            end: 6,
        })
    );
    assert!(block.write(usize::MAX, 1u8).is_err());
    assert!(block.bytes_mut(6, 1).is_err());
    assert!(block.bytes(6, 0).is_ok());
}

#[test]
fn prefix_copy_preserves_ancestor_fields() {
    let mut parent = DataBlock::zeroed(4);
    parent.write(0, 0x1234_5678u32).expect("in bounds");

    let child = DataBlock::with_prefix(12, &parent);
    assert_eq!(child.len(), 12);
    assert_eq!(child.read::<u32>(0), Ok(0x1234_5678));
    assert_eq!(child.read::<u64>(4), Ok(0));
}

#[test]
fn checked_respects_allowed_window() {
    let block = DataBlock::zeroed(16);
    assert_eq!(block.checked(8, 4, 8..12), Ok(8..12));
    assert_eq!(
        block.checked(4, 4, 8..12),
        Err(ObjectError::FieldOutOfBounds {
            offset: 4,
            len: 4,
            start: 8,
            end: 12,
        })
    );
}

#[test]
fn default_block_is_empty() {
    assert!(DataBlock::default().is_empty());
}
