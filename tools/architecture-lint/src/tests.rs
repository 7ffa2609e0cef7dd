//! Unit tests for the architecture lint.

use std::path::PathBuf;

use rstest::rstest;

use super::*;

fn lint_one(file: &str, contents: &str) -> Result<(), ArchitectureLintError> {
    lint_sources(&[LintSource {
        file: PathBuf::from(file),
        contents: contents.to_owned(),
    }])
}

#[rstest]
#[case("inbound/http/tasks.rs", "use crate::domain::TaskId; fn f() { let _ = TaskId::random(); }")]
#[case("client/api.rs", "use crate::domain::Task; use reqwest::Client; fn f(_: Client, _: Task) {}")]
#[case("outbound/security/jwt_codec.rs", "use jsonwebtoken::Header; fn f(_: Header) {}")]
#[case("outbound/persistence/task_repository.rs", "use diesel::prelude::*; fn f() {}")]
#[case("domain/task.rs", "use serde::Serialize; use chrono::Utc; fn f() { let _ = Utc::now(); }")]
fn permitted_imports_pass(#[case] file: &str, #[case] contents: &str) {
    let result = lint_one(file, contents);
    assert!(result.is_ok(), "result: {result:?}");
}

#[rstest]
#[case("inbound/http/tasks.rs", "use crate::outbound::memory::MemoryTaskRepository;", "crate::outbound")]
#[case("inbound/http/tasks.rs", "use taskflow::outbound::persistence::DbPool;", "crate::outbound")]
#[case("inbound/http/users.rs", "use argon2::Argon2;", "`argon2`")]
#[case("inbound/http/users.rs", "use diesel::prelude::*;", "`diesel`")]
#[case("domain/task.rs", "use crate::inbound::http;", "crate::inbound")]
#[case("domain/task.rs", "use utoipa::ToSchema;", "`utoipa`")]
#[case("domain/auth.rs", "use jsonwebtoken::Header;", "`jsonwebtoken`")]
#[case("domain/task.rs", "fn f() { let _ = actix_web::HttpResponse::Ok(); }", "`actix_web`")]
#[case("outbound/memory/task_repository.rs", "use super::super::inbound::http;", "crate::inbound")]
#[case("outbound/persistence/models.rs", "use actix_web::web;", "`actix_web`")]
#[case("client/dashboard.rs", "use crate::inbound::http::tasks;", "crate::inbound")]
#[case("client/api.rs", "use crate::outbound::security::JwtTokenCodec;", "crate::outbound")]
#[case("client/api.rs", "use actix_web::test;", "`actix_web`")]
fn boundary_crossings_are_reported(
    #[case] file: &str,
    #[case] contents: &str,
    #[case] expected: &str,
) {
    match lint_one(file, contents) {
        Err(ArchitectureLintError::Violations(violations)) => {
            assert_eq!(violations.len(), 1, "violations: {violations:?}");
            let violation = violations.first().expect("one violation");
            assert!(
                violation.message.contains(expected),
                "message: {}",
                violation.message
            );
        }
        other => panic!("expected a violation, got {other:?}"),
    }
}

#[test]
fn files_outside_known_layers_are_rejected() {
    let result = lint_one("settings.rs", "fn f() {}");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}

#[test]
fn unparsable_sources_are_rejected() {
    let result = lint_one("domain/task.rs", "fn {");
    assert!(matches!(result, Err(ArchitectureLintError::Parse { .. })));
}
