//! Candidate union: everyone who should end up holding the role.

use std::collections::HashSet;

use grantsync_directory::DirectorySnapshot;

use crate::desired::DesiredMembership;

/// Usernames of directory users in any desired group, plus every explicitly
/// desired user.
///
/// Each name appears once no matter how many groups or explicit entries
/// reference it. Iteration order is unspecified; sort if you need one.
pub fn union_of_users_to_grant<G>(
    directory: &DirectorySnapshot,
    desired: &DesiredMembership<G>,
) -> HashSet<String> {
    let group_names = desired.unique_group_names();

    let mut result: HashSet<String> = directory
        .list()
        .filter(|user| group_names.iter().any(|group| user.is_member_of(group)))
        .map(|user| user.username.clone())
        .collect();

    for username in desired.unique_users() {
        if !result.contains(username) {
            result.insert(username.to_string());
        }
    }

    result
}
