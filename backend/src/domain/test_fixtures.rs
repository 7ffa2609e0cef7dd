//! Shared fixtures for domain and adapter unit tests.

use std::sync::Arc;

use chrono::{DateTime, Local, TimeZone, Utc};
use mockable::Clock;

use crate::domain::{
    EmailAddress, PasswordDigest, Task, TaskDraft, TaskId, TaskStatus, TaskTitle, User,
    UserAccount, UserId, UserName,
};

pub(crate) fn fixture_timestamp() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0)
        .single()
        .expect("valid fixture timestamp")
}

pub(crate) struct FixtureClock {
    utc_now: DateTime<Utc>,
}

impl Clock for FixtureClock {
    fn local(&self) -> DateTime<Local> {
        self.utc_now.with_timezone(&Local)
    }

    fn utc(&self) -> DateTime<Utc> {
        self.utc_now
    }
}

pub(crate) fn fixture_clock() -> Arc<dyn Clock> {
    Arc::new(FixtureClock {
        utc_now: fixture_timestamp(),
    })
}

pub(crate) fn sample_user(email: &str) -> User {
    User::new(
        UserId::random(),
        UserName::new("Ada Lovelace").expect("fixture name"),
        EmailAddress::new(email).expect("fixture email"),
        fixture_timestamp(),
    )
}

pub(crate) fn sample_account(email: &str, digest: &str) -> UserAccount {
    UserAccount {
        user: sample_user(email),
        password_digest: PasswordDigest::new(digest),
    }
}

pub(crate) fn sample_task(owner: &UserId, title: &str, offset_secs: i64) -> Task {
    let created_at = fixture_timestamp() + chrono::Duration::seconds(offset_secs);
    Task::new(TaskDraft {
        id: TaskId::random(),
        owner: owner.clone(),
        title: TaskTitle::new(title).expect("fixture title"),
        description: String::new(),
        status: TaskStatus::Pending,
        created_at,
        updated_at: created_at,
    })
}
