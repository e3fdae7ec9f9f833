use proptest::prelude::*;
use rrgen::checksum::{sector_crc32, RecordWidth};
use rrgen::generate::{generate, SectorEvent};
use rrgen::{SliceSet, SECTOR_SIZE};
use std::io::Cursor;

fn run(data: &[u8], slices: usize, width: RecordWidth) -> (Vec<u8>, Vec<u8>) {
    let mut input = Cursor::new(data.to_vec());
    let mut crcs = Vec::new();
    let mut rr = Vec::new();
    generate::<_, _, _, fn(&SectorEvent)>(
        &mut input,
        data.len() as u64,
        slices,
        width,
        &mut crcs,
        &mut rr,
        None,
    )
    .unwrap();
    (crcs, rr)
}

fn sectors_of(data: &[u8]) -> Vec<[u8; SECTOR_SIZE]> {
    let mut out = Vec::new();
    let count = data.len().div_ceil(SECTOR_SIZE);
    for i in 0..count {
        let mut sector = [0u8; SECTOR_SIZE];
        let start = i * SECTOR_SIZE;
        let end = (start + SECTOR_SIZE).min(data.len());
        sector[..end - start].copy_from_slice(&data[start..end]);
        out.push(sector);
    }
    out
}

proptest! {
    #[test]
    fn output_sizes_hold(data in proptest::collection::vec(any::<u8>(), 0..4096),
                         n in 1usize..6) {
        let (crcs, rr) = run(&data, n, RecordWidth::Wide);
        let records = data.len().div_ceil(SECTOR_SIZE);
        prop_assert_eq!(crcs.len(), records * 4);
        prop_assert_eq!(rr.len(), n * SECTOR_SIZE);
    }

    #[test]
    fn records_are_truncated_sector_crcs(data in proptest::collection::vec(any::<u8>(), 1..2048)) {
        let (crcs, _) = run(&data, 2, RecordWidth::Narrow);
        for (i, sector) in sectors_of(&data).iter().enumerate() {
            let stored = u16::from_le_bytes([crcs[i * 2], crcs[i * 2 + 1]]) as u32;
            prop_assert_eq!(stored, sector_crc32(sector) & 0xFFFF);
        }
    }

    #[test]
    fn rotation_assigns_sector_i_to_slice_i_mod_n(
        data in proptest::collection::vec(any::<u8>(), 1..4096),
        n in 1usize..5,
    ) {
        let (_, rr) = run(&data, n, RecordWidth::Wide);
        let sectors = sectors_of(&data);
        for slice_idx in 0..n {
            let mut expected = [0u8; SECTOR_SIZE];
            for (i, sector) in sectors.iter().enumerate() {
                if i % n == slice_idx {
                    for (acc, b) in expected.iter_mut().zip(sector.iter()) {
                        *acc ^= *b;
                    }
                }
            }
            let got = &rr[slice_idx * SECTOR_SIZE..(slice_idx + 1) * SECTOR_SIZE];
            prop_assert_eq!(got, &expected[..]);
        }
    }

    #[test]
    fn double_fold_returns_slice_to_zero(sector_bytes in proptest::collection::vec(any::<u8>(), SECTOR_SIZE)) {
        let mut sector = [0u8; SECTOR_SIZE];
        sector.copy_from_slice(&sector_bytes);

        let mut set = SliceSet::new(1).unwrap();
        set.fold(&sector);
        set.fold(&sector);
        prop_assert!(set.slice(0).iter().all(|&b| b == 0));
    }

    #[test]
    fn generation_is_deterministic(data in proptest::collection::vec(any::<u8>(), 0..2048),
                                   n in 1usize..4) {
        let a = run(&data, n, RecordWidth::Wide);
        let b = run(&data, n, RecordWidth::Wide);
        prop_assert_eq!(a, b);
    }
}
