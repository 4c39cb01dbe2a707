//! The resource key every DBPF entry and CLST record is addressed by.

/// `(typeId, groupId, instanceId[, resourceId])`. `resource_id` is `0` when
/// the owning archive has `indexVersion == 1`, in which only three u32s are
/// actually present on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Identity {
    pub type_id: u32,
    pub group_id: u32,
    pub instance_id: u32,
    pub resource_id: u32,
}

impl Identity {
    pub const CLST: Identity = Identity {
        type_id: crate::config::CLST_TYPE_ID,
        group_id: crate::config::CLST_GROUP_ID,
        instance_id: crate::config::CLST_INSTANCE_ID,
        resource_id: 0,
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equal_tuples_hash_identically() {
        use std::collections::HashSet;
        let a = Identity { type_id: 1, group_id: 2, instance_id: 3, resource_id: 0 };
        let b = Identity { type_id: 1, group_id: 2, instance_id: 3, resource_id: 0 };
        let mut set = HashSet::new();
        set.insert(a);
        assert!(set.contains(&b));
    }

    #[test]
    fn clst_identity_matches_known_constants() {
        assert_eq!(Identity::CLST.type_id, 0xE86B_1EEF);
        assert_eq!(Identity::CLST.instance_id, 0x286B_1F03);
    }
}
