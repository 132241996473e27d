//! Size constants grouped by primitive family

pub mod hash;
pub mod symmetric;
