//! Department handlers
//!
//! Implements the department CRUD surface: create, list, fetch by id or
//! name, partial update, delete.

use axum::{
    extract::{Path, State},
    response::Json,
};
use sea_orm::sea_query::{Expr, ExprTrait, Func};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set, Unchanged,
};
use serde::Deserialize;
use tracing::info;

use crate::entity::department;
use crate::error::{AppError, AppResult, FieldError, OptionExt};
use crate::state::AppState;

/// Create department request. All fields are optional at the serde level so
/// a missing field surfaces as a field validation error rather than a
/// deserialization failure.
#[derive(Debug, Default, Deserialize)]
pub struct NewDepartment {
    pub name: Option<String>,
    pub address: Option<String>,
    pub code: Option<String>,
}

/// Partial update request. Absent or empty fields mean "leave unchanged".
#[derive(Debug, Default, Deserialize)]
pub struct DepartmentUpdate {
    pub name: Option<String>,
    pub address: Option<String>,
    pub code: Option<String>,
}

/// Validate a create request: all three fields mandatory, name is letters
/// only, code is at most 6 characters. Collects every offending field.
fn validate_new_department(req: &NewDepartment) -> AppResult<()> {
    let mut errors = Vec::new();

    match req.name.as_deref() {
        None => errors.push(FieldError::new("name", "Department Name is mandatory")),
        Some(name) if name.trim().is_empty() => {
            errors.push(FieldError::new("name", "Department Name is mandatory"))
        }
        Some(name) if !name.chars().all(|c| c.is_ascii_alphabetic()) => {
            errors.push(FieldError::new("name", "Letters only"))
        }
        Some(_) => {}
    }

    match req.address.as_deref() {
        Some(address) if !address.trim().is_empty() => {}
        _ => errors.push(FieldError::new("address", "Department Address is mandatory")),
    }

    match req.code.as_deref() {
        None => errors.push(FieldError::new("code", "Department Code is mandatory")),
        Some(code) if code.trim().is_empty() => {
            errors.push(FieldError::new("code", "Department Code is mandatory"))
        }
        Some(code) if code.chars().count() > 6 => {
            errors.push(FieldError::new("code", "Maximum length of 6 only"))
        }
        Some(_) => {}
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(AppError::Validation(errors))
    }
}

/// Copy the supplied fields of a partial update onto an existing record.
/// A field overwrites only when present and not the empty string; format
/// constraints are not re-checked here, only the creation path validates.
fn merge(existing: department::Model, patch: DepartmentUpdate) -> department::Model {
    fn pick(patched: Option<String>, current: String) -> String {
        match patched {
            Some(value) if !value.is_empty() => value,
            _ => current,
        }
    }

    department::Model {
        id: existing.id,
        name: pick(patch.name, existing.name),
        address: pick(patch.address, existing.address),
        code: pick(patch.code, existing.code),
    }
}

/// Parse a path id, mapping failure to a 400 type-mismatch error
fn parse_id(raw: &str) -> AppResult<i64> {
    raw.parse().map_err(|_| AppError::TypeMismatch {
        name: "id",
        expected: "i64",
    })
}

/// Fetch a department by id or fail with NotFound
pub(crate) async fn find_by_id_or_fail(
    db: &DatabaseConnection,
    id: i64,
) -> AppResult<department::Model> {
    department::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_not_found(format!("/departments/{}", id))
}

/// Fetch a department by exact name or fail with NotFound
pub(crate) async fn find_one_by_name_or_fail(
    db: &DatabaseConnection,
    name: &str,
) -> AppResult<department::Model> {
    department::Entity::find()
        .filter(department::Column::Name.eq(name))
        .one(db)
        .await?
        .ok_or_not_found(format!("/departments/name/one/{}", name))
}

/// POST /departments
pub async fn save_department(
    State(state): State<AppState>,
    Json(req): Json<NewDepartment>,
) -> AppResult<Json<department::Model>> {
    validate_new_department(&req)?;

    let new_dept = department::ActiveModel {
        name: Set(req.name.unwrap_or_default()),
        address: Set(req.address.unwrap_or_default()),
        code: Set(req.code.unwrap_or_default()),
        ..Default::default()
    };

    let dept = new_dept.insert(&state.db).await?;
    info!("created department {} ({})", dept.name, dept.id);
    Ok(Json(dept))
}

/// GET /departments
pub async fn fetch_department_list(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<department::Model>>> {
    let depts = department::Entity::find().all(&state.db).await?;
    Ok(Json(depts))
}

/// GET /departments/:id
pub async fn fetch_department_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<department::Model>> {
    let id = parse_id(&id)?;
    let dept = find_by_id_or_fail(&state.db, id).await?;
    Ok(Json(dept))
}

/// DELETE /departments/:id
pub async fn delete_department_by_id(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<&'static str> {
    let id = parse_id(&id)?;

    // Confirm the id resolves before issuing the deletion
    find_by_id_or_fail(&state.db, id).await?;

    department::Entity::delete_by_id(id).exec(&state.db).await?;
    info!("deleted department {}", id);
    Ok("Department deleted successfully")
}

/// PUT /departments/:id
pub async fn update_department(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(patch): Json<DepartmentUpdate>,
) -> AppResult<Json<department::Model>> {
    let id = parse_id(&id)?;
    let existing = find_by_id_or_fail(&state.db, id).await?;

    let merged = merge(existing, patch);
    let update = department::ActiveModel {
        id: Unchanged(merged.id),
        name: Set(merged.name),
        address: Set(merged.address),
        code: Set(merged.code),
    };

    let dept = update.update(&state.db).await?;
    info!("updated department {}", dept.id);
    Ok(Json(dept))
}

/// GET /departments/name/all/:name
pub async fn fetch_departments_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Vec<department::Model>>> {
    let depts = department::Entity::find()
        .filter(
            Expr::expr(Func::lower(Expr::col(department::Column::Name)))
                .eq(name.to_lowercase()),
        )
        .all(&state.db)
        .await?;
    Ok(Json(depts))
}

/// GET /departments/name/one/:name
pub async fn fetch_one_department_by_name(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<department::Model>> {
    let dept = find_one_by_name_or_fail(&state.db, &name).await?;
    Ok(Json(dept))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};

    fn sample() -> department::Model {
        department::Model {
            id: 1,
            name: "IT".to_string(),
            address: "3rd Cross, First Street".to_string(),
            code: "IT-006".to_string(),
        }
    }

    fn state_with(db: DatabaseConnection) -> AppState {
        AppState::new(db, Config::default())
    }

    #[test]
    fn merge_with_empty_patch_keeps_record() {
        let merged = merge(sample(), DepartmentUpdate::default());
        assert_eq!(merged, sample());
    }

    #[test]
    fn merge_treats_empty_strings_as_absent() {
        let patch = DepartmentUpdate {
            name: Some(String::new()),
            address: Some(String::new()),
            code: Some(String::new()),
        };
        let merged = merge(sample(), patch);
        assert_eq!(merged, sample());
    }

    #[test]
    fn merge_with_name_only_patch() {
        let patch = DepartmentUpdate {
            name: Some("CS".to_string()),
            ..Default::default()
        };
        let merged = merge(sample(), patch);
        assert_eq!(merged.name, "CS");
        assert_eq!(merged.address, "3rd Cross, First Street");
        assert_eq!(merged.code, "IT-006");
    }

    #[test]
    fn merge_never_touches_id() {
        let patch = DepartmentUpdate {
            name: Some("CS".to_string()),
            address: Some("4th St".to_string()),
            code: Some("CS-001".to_string()),
        };
        let merged = merge(sample(), patch);
        assert_eq!(merged.id, 1);
    }

    #[test]
    fn validation_flags_every_missing_field() {
        let err = validate_new_department(&NewDepartment::default()).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(
                    errors,
                    vec![
                        FieldError::new("name", "Department Name is mandatory"),
                        FieldError::new("address", "Department Address is mandatory"),
                        FieldError::new("code", "Department Code is mandatory"),
                    ]
                );
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn validation_rejects_non_letter_name() {
        let req = NewDepartment {
            name: Some("12345".to_string()),
            address: Some("Crossroads".to_string()),
            code: Some("CS-001".to_string()),
        };
        let err = validate_new_department(&req).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors, vec![FieldError::new("name", "Letters only")]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn validation_rejects_long_code() {
        let req = NewDepartment {
            name: Some("CS".to_string()),
            address: Some("Crossroads".to_string()),
            code: Some("CS-00123".to_string()),
        };
        let err = validate_new_department(&req).unwrap_err();
        match err {
            AppError::Validation(errors) => {
                assert_eq!(errors, vec![FieldError::new("code", "Maximum length of 6 only")]);
            }
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn validation_accepts_well_formed_input() {
        let req = NewDepartment {
            name: Some("CS".to_string()),
            address: Some("Crossroads".to_string()),
            code: Some("CS-001".to_string()),
        };
        assert!(validate_new_department(&req).is_ok());
    }

    #[test]
    fn parse_id_rejects_non_numeric() {
        let err = parse_id("abc").unwrap_err();
        assert!(matches!(
            err,
            AppError::TypeMismatch {
                name: "id",
                expected: "i64"
            }
        ));
        assert_eq!(parse_id("42").unwrap(), 42);
    }

    #[tokio::test]
    async fn find_by_id_returns_department() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample()]])
            .into_connection();

        let found = find_by_id_or_fail(&db, 1).await.unwrap();
        assert_eq!(found, sample());
    }

    #[tokio::test]
    async fn find_by_missing_id_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<department::Model>::new()])
            .into_connection();

        let err = find_by_id_or_fail(&db, 5).await.unwrap_err();
        match err {
            AppError::NotFound(request) => assert_eq!(request, "/departments/5"),
            other => panic!("expected not found, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn find_one_by_missing_name_is_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<department::Model>::new()])
            .into_connection();

        let err = find_one_by_name_or_fail(&db, "invalid").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn delete_on_missing_id_skips_deletion() {
        // No exec results appended: reaching the delete would error out with
        // a mock exhaustion failure instead of NotFound.
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<department::Model>::new()])
            .into_connection();

        let result = delete_department_by_id(
            State(state_with(db)),
            Path("5".to_string()),
        )
        .await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }

    #[tokio::test]
    async fn delete_confirms_then_removes() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample()]])
            .append_exec_results([MockExecResult {
                last_insert_id: 0,
                rows_affected: 1,
            }])
            .into_connection();

        let message = delete_department_by_id(
            State(state_with(db)),
            Path("1".to_string()),
        )
        .await
        .unwrap();
        assert_eq!(message, "Department deleted successfully");
    }

    #[tokio::test]
    async fn update_merges_through_to_storage() {
        let updated = department::Model {
            name: "CS".to_string(),
            code: "CS-001".to_string(),
            ..sample()
        };
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample()], vec![updated.clone()]])
            .into_connection();

        let patch = DepartmentUpdate {
            name: Some("CS".to_string()),
            code: Some("CS-001".to_string()),
            ..Default::default()
        };
        let Json(dept) = update_department(
            State(state_with(db)),
            Path("1".to_string()),
            Json(patch),
        )
        .await
        .unwrap();
        assert_eq!(dept, updated);
    }

    #[tokio::test]
    async fn save_returns_stored_department_with_id() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![sample()]])
            .into_connection();

        let req = NewDepartment {
            name: Some("IT".to_string()),
            address: Some("3rd Cross, First Street".to_string()),
            code: Some("IT-006".to_string()),
        };
        let Json(dept) = save_department(State(state_with(db)), Json(req))
            .await
            .unwrap();
        assert_eq!(dept.id, 1);
        assert_eq!(dept.name, "IT");
    }
}
