//! Join detection.
//!
//! Only a move from "not in the chat" (left or kicked) to plain member counts
//! as a join. Promotions, demotions and restricted -> member do not re-trigger
//! the announcement.

use teloxide::types::ChatId;

use super::model::{MemberStatus, MembershipEvent};
use crate::config::AllowList;

/// Returns true iff the transition is a qualifying join.
pub fn is_join_event(old: MemberStatus, new: MemberStatus) -> bool {
    matches!(old, MemberStatus::Left | MemberStatus::Kicked) && new == MemberStatus::Member
}

/// What to do with a membership event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinDecision {
    NotAJoin,
    ChatNotAllowed,
    BotUser,
    Announce(ChatId),
}

/// Applies the join rule plus suppression (allow-list, bots).
#[derive(Debug, Clone, Default)]
pub struct JoinDetector {
    allow_list: AllowList,
}

impl JoinDetector {
    pub fn new(allow_list: AllowList) -> Self {
        Self { allow_list }
    }

    pub fn evaluate(&self, event: &MembershipEvent) -> JoinDecision {
        if !is_join_event(event.old_status, event.new_status) {
            return JoinDecision::NotAJoin;
        }
        if !self.allow_list.permits(event.chat_id) {
            return JoinDecision::ChatNotAllowed;
        }
        if event.is_bot {
            return JoinDecision::BotUser;
        }
        JoinDecision::Announce(event.chat_id)
    }
}

#[cfg(test)]
mod tests {
    use teloxide::types::UserId;

    use super::*;

    fn event(chat: i64, is_bot: bool, old: MemberStatus, new: MemberStatus) -> MembershipEvent {
        MembershipEvent {
            chat_id: ChatId(chat),
            user_id: UserId(42),
            user_name: "Alice".to_string(),
            is_bot,
            old_status: old,
            new_status: new,
        }
    }

    #[test]
    fn test_full_status_matrix() {
        let mut joins = Vec::new();
        let mut others = 0;

        for old in MemberStatus::ALL {
            for new in MemberStatus::ALL {
                if is_join_event(old, new) {
                    joins.push((old, new));
                } else {
                    others += 1;
                }
            }
        }

        assert_eq!(
            joins,
            vec![
                (MemberStatus::Left, MemberStatus::Member),
                (MemberStatus::Kicked, MemberStatus::Member),
            ]
        );
        assert_eq!(others, 34);
    }

    #[test]
    fn test_restricted_to_member_is_not_a_join() {
        assert!(!is_join_event(MemberStatus::Restricted, MemberStatus::Member));
        assert!(!is_join_event(MemberStatus::Member, MemberStatus::Administrator));
        assert!(!is_join_event(MemberStatus::Administrator, MemberStatus::Left));
    }

    #[test]
    fn test_bot_users_are_suppressed() {
        let detector = JoinDetector::default();
        for old in [MemberStatus::Left, MemberStatus::Kicked] {
            let decision = detector.evaluate(&event(-100, true, old, MemberStatus::Member));
            assert_eq!(decision, JoinDecision::BotUser);
        }
    }

    #[test]
    fn test_allow_list_gate() {
        let detector = JoinDetector::new([-100, -200].into_iter().collect());

        let inside = event(-200, false, MemberStatus::Left, MemberStatus::Member);
        assert_eq!(detector.evaluate(&inside), JoinDecision::Announce(ChatId(-200)));

        let outside = event(-300, false, MemberStatus::Left, MemberStatus::Member);
        assert_eq!(detector.evaluate(&outside), JoinDecision::ChatNotAllowed);
    }

    #[test]
    fn test_empty_allow_list_admits_all_chats() {
        let detector = JoinDetector::default();
        let joined = event(-999, false, MemberStatus::Kicked, MemberStatus::Member);
        assert_eq!(detector.evaluate(&joined), JoinDecision::Announce(ChatId(-999)));
    }

    #[test]
    fn test_non_join_wins_over_suppression() {
        let detector = JoinDetector::new([1].into_iter().collect());
        let promoted = event(-5, true, MemberStatus::Member, MemberStatus::Administrator);
        assert_eq!(detector.evaluate(&promoted), JoinDecision::NotAJoin);
    }
}
