use crate::{
    api::{adjustment, employee, payroll},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let api_limiter = build_limiter(config.rate_api_per_min);
    // Generation walks the whole active employee set, so it gets its own knob.
    let generate_limiter = build_limiter(config.rate_generate_per_min);

    cfg.service(
        web::scope(&format!("{}/v1", config.api_prefix))
            .wrap(api_limiter)
            .service(
                web::scope("/employees")
                    // /employees
                    .service(
                        web::resource("")
                            .route(web::post().to(employee::create_employee))
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /employees/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee))
                            .route(web::delete().to(employee::delete_employee)),
                    ),
            )
            .service(
                web::scope("/payroll")
                    // literal segments first so /{id} cannot shadow them
                    .service(
                        web::resource("/generate")
                            .wrap(generate_limiter)
                            .route(web::post().to(payroll::generate)),
                    )
                    .service(web::resource("/stats").route(web::get().to(payroll::stats)))
                    .service(
                        web::resource("/adjustments")
                            .route(web::post().to(adjustment::create_adjustment)),
                    )
                    .service(
                        web::resource("/adjustments/{id}")
                            .route(web::delete().to(adjustment::delete_adjustment)),
                    )
                    .service(
                        web::resource("/employee/{employee_id}")
                            .route(web::get().to(payroll::employee_history)),
                    )
                    // /payroll
                    .service(
                        web::resource("")
                            .route(web::post().to(payroll::create_salary))
                            .route(web::get().to(payroll::list_salaries)),
                    )
                    // /payroll/{id}
                    .service(
                        web::resource("/{id}/adjustments")
                            .route(web::get().to(adjustment::list_adjustments)),
                    )
                    .service(web::resource("/{id}/pay").route(web::put().to(payroll::pay_salary)))
                    .service(
                        web::resource("/{id}/cancel").route(web::put().to(payroll::cancel_salary)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(payroll::get_salary))
                            .route(web::delete().to(payroll::delete_salary)),
                    ),
            ),
    );
}
