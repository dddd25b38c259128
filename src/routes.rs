use crate::{
    api::{self, attendance, health, student},
    config::Config,
    store::{AttendanceLedger, StudentDirectory},
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{Scope, web};
use sqlx::SqlitePool;
use tracing::warn;

pub fn configure(cfg: &mut web::ServiceConfig, pool: SqlitePool, config: &Config) {
    cfg.app_data(web::Data::new(StudentDirectory::new(pool.clone())))
        .app_data(web::Data::new(AttendanceLedger::new(pool.clone())))
        .app_data(web::Data::new(pool))
        .app_data(api::json_config())
        .app_data(api::query_config())
        .route("/health", web::get().to(health::health));

    // the empty-prefix scope swallows every path, so it has to come last
    match build_limiter(config.rate_per_min) {
        Some(limiter) => {
            cfg.service(endpoints(web::scope("")).wrap(limiter));
        }
        None => {
            cfg.service(endpoints(web::scope("")));
        }
    }
}

fn endpoints(scope: Scope) -> Scope {
    scope
        .service(web::resource("/add_student").route(web::post().to(student::add_student)))
        .service(
            web::resource("/record_attendance")
                .route(web::post().to(attendance::record_attendance)),
        )
        .service(
            web::resource("/check_attendance").route(web::get().to(attendance::check_attendance)),
        )
        .service(
            web::resource("/attendance_details_by_status")
                .route(web::get().to(attendance::attendance_details_by_status)),
        )
        .service(
            web::resource("/modify_attendance_status")
                .route(web::put().to(attendance::modify_attendance_status)),
        )
}

/// Per peer IP limiter; `None` when disabled (0) or the quota can't be built.
fn build_limiter(requests_per_min: u32) -> Option<Governor<PeerIpKeyExtractor, NoOpMiddleware>> {
    if requests_per_min == 0 {
        return None;
    }

    let per_ms = (60_000 / requests_per_min as u64).max(1);
    let cfg = GovernorConfigBuilder::default()
        .per_millisecond(per_ms)
        .burst_size(requests_per_min)
        .key_extractor(PeerIpKeyExtractor)
        .finish();

    match cfg {
        Some(cfg) => Some(Governor::new(&cfg)),
        None => {
            warn!(requests_per_min, "Invalid rate limit, serving without limiter");
            None
        }
    }
}
