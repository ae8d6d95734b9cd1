#![no_main]

use libfuzzer_sys::fuzz_target;
use lrukit::ds::SentinelList;
use lrukit::error::ListError;

// Fuzz arbitrary operation sequences on SentinelList
//
// Tests random sequences of push/pop at both ends, handle-based moves and
// removals (including stale handles), positional insert, value removal,
// rotate and reverse. Link invariants are checked after every step.
fuzz_target!(|data: &[u8]| {
    let mut list: SentinelList<u8> = SentinelList::new();
    let mut all_ids = Vec::new();

    for pair in data.chunks_exact(2) {
        let op = pair[0] % 11;
        let value = pair[1];

        match op {
            0 => {
                let id = list.push_front(value);
                all_ids.push(id);
                assert_eq!(list.front(), Some(&value));
            }
            1 => {
                let id = list.push_back(value);
                all_ids.push(id);
                assert_eq!(list.back(), Some(&value));
            }
            2 => {
                let old_len = list.len();
                match list.pop_front() {
                    Ok(_) => assert_eq!(list.len(), old_len - 1),
                    Err(e) => {
                        assert_eq!(e, ListError::Empty);
                        assert_eq!(old_len, 0);
                    }
                }
            }
            3 => {
                let old_len = list.len();
                match list.pop_back() {
                    Ok(_) => assert_eq!(list.len(), old_len - 1),
                    Err(e) => {
                        assert_eq!(e, ListError::Empty);
                        assert_eq!(old_len, 0);
                    }
                }
            }
            4 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    if list.move_to_front(id) {
                        assert_eq!(list.front_id(), Some(id));
                    }
                }
            }
            5 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    if list.move_to_back(id) {
                        assert_eq!(list.back_id(), Some(id));
                    }
                }
            }
            6 => {
                if !all_ids.is_empty() {
                    let id = all_ids[value as usize % all_ids.len()];
                    let old_len = list.len();
                    if list.remove_node(id).is_ok() {
                        assert_eq!(list.len(), old_len - 1);
                    } else {
                        assert_eq!(list.len(), old_len);
                    }
                }
            }
            7 => {
                let old_len = list.len();
                let id = list.insert(usize::from(value % 16), value);
                all_ids.push(id);
                assert_eq!(list.len(), old_len + 1);
            }
            8 => {
                let had = list.count(&value);
                let res = list.remove_value(&value);
                assert_eq!(res.is_ok(), had > 0);
                assert_eq!(list.count(&value), had.saturating_sub(1));
            }
            9 => {
                let before: Vec<u8> = list.iter().copied().collect();
                match list.rotate(isize::from(value as i8)) {
                    Ok(()) => assert_eq!(list.len(), before.len()),
                    Err(_) => assert!(before.is_empty()),
                }
            }
            10 => {
                let before: Vec<u8> = list.iter().copied().collect();
                list.reverse();
                let after: Vec<u8> = list.iter().rev().copied().collect();
                assert_eq!(before, after);
            }
            _ => unreachable!(),
        }

        list.check_invariants().unwrap();
    }
});
