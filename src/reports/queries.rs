//! SQL for the reporting endpoints.
//!
//! Each function takes an already-acquired connection so a handler can
//! run several counts on the same one, and every value is bound as a
//! parameter rather than interpolated.

use sqlx::MySqlConnection;

use super::{AreaCount, PaymentWindow};

const COUNT_ENROLLMENTS_SQL: &str = "SELECT COUNT(*) FROM inscripcion_simulacros";

const COUNT_QUALIFYING_PAYMENTS_SQL: &str = "\
    SELECT COUNT(*) \
    FROM banco_pagos \
    WHERE fch_pag BETWEEN ? AND ? \
      AND imp_pag > ? \
      AND imp_pag <= ?";

const ENROLLMENTS_BY_AREA_SQL: &str = "\
    SELECT \
        a.denominacion AS area, \
        COUNT(DISTINCT ise.nro_documento) AS total_inscritos \
    FROM inscripcion_simulacros ise \
    INNER JOIN estudiantes e ON ise.nro_documento = e.nro_documento \
    INNER JOIN inscripciones i ON e.id = i.estudiantes_id \
    INNER JOIN areas a ON i.areas_id = a.id \
    WHERE i.periodos_id = ? \
    GROUP BY a.id, a.denominacion \
    ORDER BY a.denominacion";

/// Total number of mock-exam enrollment records.
pub async fn count_enrollments(conn: &mut MySqlConnection) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(COUNT_ENROLLMENTS_SQL).fetch_one(conn).await
}

/// Number of payments inside the qualification window.
///
/// Deliberately not joined against enrollment: this counts every bank
/// payment in the window, whether or not the payer is enrolled. The
/// area breakdown is the one that joins through `estudiantes`.
pub async fn count_qualifying_payments(
    conn: &mut MySqlConnection,
    window: &PaymentWindow,
) -> Result<i64, sqlx::Error> {
    sqlx::query_scalar(COUNT_QUALIFYING_PAYMENTS_SQL)
        .bind(window.start)
        .bind(window.end)
        .bind(window.min_exclusive)
        .bind(window.max_inclusive)
        .fetch_one(conn)
        .await
}

/// Distinct enrolled students per area for one period, ordered by area
/// name ascending.
pub async fn enrollments_by_area(
    conn: &mut MySqlConnection,
    period_id: u32,
) -> Result<Vec<AreaCount>, sqlx::Error> {
    sqlx::query_as(ENROLLMENTS_BY_AREA_SQL)
        .bind(period_id)
        .fetch_all(conn)
        .await
}
