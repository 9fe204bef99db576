//! Channel permission computation from explicit snapshots.
//!
//! Implements the documented base-permissions + overwrite algorithm: the
//! @everyone role and the member's roles establish a guild-wide base,
//! ADMINISTRATOR short-circuits everything, then channel overwrites apply in
//! @everyone → role → member order (deny before allow at each step).
//! Pure functions over wire types; no live connection object involved.

use crate::types::{PermissionOverwrite, Role, OVERWRITE_TYPE_MEMBER, OVERWRITE_TYPE_ROLE};

pub const ADMINISTRATOR: u64 = 1 << 3;
pub const VIEW_CHANNEL: u64 = 1 << 10;
pub const SEND_MESSAGES: u64 = 1 << 11;
pub const EMBED_LINKS: u64 = 1 << 14;
pub const ATTACH_FILES: u64 = 1 << 15;

/// Guild-wide base permissions for a member. The @everyone role shares its
/// id with the guild.
pub fn compute_base_permissions(guild_id: &str, member_role_ids: &[String], roles: &[Role]) -> u64 {
    let mut base = roles
        .iter()
        .find(|r| r.id == guild_id)
        .map(|r| r.permissions)
        .unwrap_or(0);

    for role in roles {
        if member_role_ids.contains(&role.id) {
            base |= role.permissions;
        }
    }

    if base & ADMINISTRATOR != 0 {
        return u64::MAX;
    }
    base
}

/// Effective permissions in one channel, given the guild-wide base.
pub fn compute_channel_permissions(
    base: u64,
    guild_id: &str,
    user_id: &str,
    member_role_ids: &[String],
    overwrites: &[PermissionOverwrite],
) -> u64 {
    if base & ADMINISTRATOR != 0 {
        return u64::MAX;
    }

    let mut perms = base;

    if let Some(everyone) = overwrites
        .iter()
        .find(|o| o.kind == OVERWRITE_TYPE_ROLE && o.id == guild_id)
    {
        perms &= !everyone.deny;
        perms |= everyone.allow;
    }

    let mut allow = 0u64;
    let mut deny = 0u64;
    for overwrite in overwrites {
        if overwrite.kind == OVERWRITE_TYPE_ROLE
            && overwrite.id != guild_id
            && member_role_ids.contains(&overwrite.id)
        {
            allow |= overwrite.allow;
            deny |= overwrite.deny;
        }
    }
    perms &= !deny;
    perms |= allow;

    if let Some(member) = overwrites
        .iter()
        .find(|o| o.kind == OVERWRITE_TYPE_MEMBER && o.id == user_id)
    {
        perms &= !member.deny;
        perms |= member.allow;
    }

    perms
}
