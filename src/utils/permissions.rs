use serenity::all::{Message, RoleId};

/// Check if the message author carries the staff role.
///
/// Guild message-create payloads include the author's member object with
/// its role list, so no HTTP round trip is needed.
pub fn is_staff(msg: &Message, staff_role_id: u64) -> bool {
    let staff_role = RoleId::new(staff_role_id);
    msg.member
        .as_ref()
        .map(|member| member.roles.contains(&staff_role))
        .unwrap_or(false)
}
