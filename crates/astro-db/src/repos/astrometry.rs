//! Parallax, proper motion and radial velocity repository.

use astro_core::entities::{Parallax, ProperMotion, RadialVelocity};

use crate::error::DatabaseError;
use crate::integrity::{Constraint, IntegrityViolation, Parent};
use crate::service::AstroService;

fn parents<'a>(source: &'a str, reference: &'a str) -> [Parent<'a>; 2] {
    [
        ("sources", "source", Some(source)),
        ("publications", "reference", Some(reference)),
    ]
}

fn duplicate(kind: &str, source: &str, reference: &str) -> impl FnOnce(Constraint) -> IntegrityViolation {
    let label = format!("{kind} of {source} from {reference}");
    move |c| match c {
        Constraint::Unique(_) => IntegrityViolation::DuplicateRecord(label),
        other => other.unknown(),
    }
}

impl AstroService {
    pub async fn insert_parallax(&self, parallax: &Parallax) -> Result<(), DatabaseError> {
        parallax.validate()?;
        let result = self
            .db()
            .conn()
            .execute(
                "INSERT INTO parallaxes (source, parallax_mas, parallax_error, adopted, comments, reference)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    parallax.source.as_str(),
                    parallax.parallax_mas,
                    parallax.parallax_error,
                    i64::from(parallax.adopted),
                    parallax.comments.as_deref(),
                    parallax.reference.as_str()
                ],
            )
            .await;
        if let Err(e) = result {
            return Err(self
                .classify_write(
                    e,
                    &parents(&parallax.source, &parallax.reference),
                    duplicate("parallax", &parallax.source, &parallax.reference),
                )
                .await);
        }
        Ok(())
    }

    pub async fn insert_proper_motion(&self, motion: &ProperMotion) -> Result<(), DatabaseError> {
        motion.validate()?;
        let result = self
            .db()
            .conn()
            .execute(
                "INSERT INTO proper_motions (source, pm_ra, pm_ra_error, pm_dec, pm_dec_error, adopted, comments, reference)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                libsql::params![
                    motion.source.as_str(),
                    motion.pm_ra,
                    motion.pm_ra_error,
                    motion.pm_dec,
                    motion.pm_dec_error,
                    i64::from(motion.adopted),
                    motion.comments.as_deref(),
                    motion.reference.as_str()
                ],
            )
            .await;
        if let Err(e) = result {
            return Err(self
                .classify_write(
                    e,
                    &parents(&motion.source, &motion.reference),
                    duplicate("proper motion", &motion.source, &motion.reference),
                )
                .await);
        }
        Ok(())
    }

    pub async fn insert_radial_velocity(&self, velocity: &RadialVelocity) -> Result<(), DatabaseError> {
        velocity.validate()?;
        let result = self
            .db()
            .conn()
            .execute(
                "INSERT INTO radial_velocities (source, rv_kms, rv_kms_error, adopted, comments, reference)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                libsql::params![
                    velocity.source.as_str(),
                    velocity.rv_kms,
                    velocity.rv_kms_error,
                    i64::from(velocity.adopted),
                    velocity.comments.as_deref(),
                    velocity.reference.as_str()
                ],
            )
            .await;
        if let Err(e) = result {
            return Err(self
                .classify_write(
                    e,
                    &parents(&velocity.source, &velocity.reference),
                    duplicate("radial velocity", &velocity.source, &velocity.reference),
                )
                .await);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{source, test_service};

    fn parallax(reference: &str) -> Parallax {
        Parallax {
            source: "V4046 Sgr".into(),
            parallax_mas: 13.8,
            parallax_error: Some(0.1),
            adopted: true,
            comments: None,
            reference: reference.into(),
        }
    }

    #[tokio::test]
    async fn parallax_for_unknown_source_is_named() {
        let svc = test_service().await;
        let err = svc.insert_parallax(&parallax("Ref1")).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Integrity(IntegrityViolation::UnknownSource(_))
        ));
    }

    #[tokio::test]
    async fn same_reference_twice_is_a_duplicate() {
        let svc = test_service().await;
        svc.insert_source(&source("V4046 Sgr", 273.54, -32.79))
            .await
            .unwrap();
        svc.insert_parallax(&parallax("Ref1")).await.unwrap();
        let err = svc.insert_parallax(&parallax("Ref1")).await.unwrap_err();
        assert!(matches!(
            err,
            DatabaseError::Integrity(IntegrityViolation::DuplicateRecord(_))
        ));
    }

    #[tokio::test]
    async fn negative_velocity_error_is_rejected() {
        let svc = test_service().await;
        let velocity = RadialVelocity {
            source: "V4046 Sgr".into(),
            rv_kms: -6.94,
            rv_kms_error: Some(-30.0),
            adopted: true,
            comments: None,
            reference: "Ref1".into(),
        };
        assert!(matches!(
            svc.insert_radial_velocity(&velocity).await,
            Err(DatabaseError::Validation(_))
        ));
    }
}
