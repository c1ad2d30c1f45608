use crate::join::{join_slot, RegistryIndex};
use crate::model::{LinkageInput, LinkageOutput, Slot, WideRow};
use crate::reshape::to_long;
use crate::summary::compute_summary;

/// Run the linkage: hash, join T1 then T2, reshape. Returns both tables + summary.
pub fn run(input: &LinkageInput) -> LinkageOutput {
    let index = RegistryIndex::build(&input.users);
    let duplicate_keys = index.duplicate_keys();
    if duplicate_keys > 0 {
        log::warn!(
            "user registry has {duplicate_keys} duplicate colorado_id value(s); matching pairs fan out"
        );
    }
    log::debug!("registry index: {} distinct key(s)", index.len());

    let seed: Vec<WideRow> = input.paper.iter().map(WideRow::from_entry).collect();
    let (after_t1, t1) = join_slot(&seed, Slot::T1, &index);
    let (wide, t2) = join_slot(&after_t1, Slot::T2, &index);
    let long = to_long(&wide);

    let summary = compute_summary(
        input.paper.len(),
        input.users.len(),
        &wide,
        &long,
        t1,
        t2,
        duplicate_keys,
    );
    log::debug!("{}", summary.describe());

    LinkageOutput { wide, long, summary }
}
