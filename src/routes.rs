use crate::{
    api::{
        bonus, confirmations, contract_type, deduction, employee, notifications, payments, payroll,
        payroll_type, performance, report, users, vacation,
    },
    auth::{handlers, middleware::session_middleware},
    config::Config,
    error::PortalError,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let requests_per_min = requests_per_min.max(1);
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(60_000 / requests_per_min as u64)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap_or_default();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // malformed bodies answer like any other invalid form
    cfg.app_data(web::JsonConfig::default().error_handler(|err, _| {
        PortalError::field("body", err.to_string()).into()
    }));

    // Public routes
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter)
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(session_middleware))
            .wrap(protected_limiter)
            .service(web::resource("/session").route(web::get().to(handlers::current_session)))
            .service(web::resource("/navigation").route(web::get().to(handlers::navigation)))
            .service(
                web::resource("/notifications").route(web::get().to(notifications::drain)),
            )
            .service(
                web::resource("/confirmations/{id}").route(web::post().to(confirmations::answer)),
            )
            .service(
                web::scope("/bonus")
                    .service(
                        web::resource("")
                            .route(web::get().to(bonus::list_bonuses))
                            .route(web::post().to(bonus::create_bonus)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(bonus::update_bonus))
                            .route(web::delete().to(bonus::delete_bonus)),
                    ),
            )
            .service(
                web::scope("/deductions")
                    .service(
                        web::resource("")
                            .route(web::get().to(deduction::list_deductions))
                            .route(web::post().to(deduction::create_deduction)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(deduction::update_deduction))
                            .route(web::delete().to(deduction::delete_deduction)),
                    ),
            )
            .service(
                web::scope("/contract-types")
                    .service(
                        web::resource("")
                            .route(web::get().to(contract_type::list_contract_types))
                            .route(web::post().to(contract_type::create_contract_type)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(contract_type::update_contract_type))
                            .route(web::delete().to(contract_type::delete_contract_type)),
                    ),
            )
            .service(
                web::scope("/payroll-types")
                    .service(
                        web::resource("")
                            .route(web::get().to(payroll_type::list_payroll_types))
                            .route(web::post().to(payroll_type::create_payroll_type)),
                    )
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(payroll_type::update_payroll_type))
                            .route(web::delete().to(payroll_type::delete_payroll_type)),
                    ),
            )
            .service(
                web::scope("/payrolls")
                    // /payrolls
                    .service(
                        web::resource("")
                            .route(web::get().to(payroll::list_payrolls))
                            .route(web::post().to(payroll::create_payroll)),
                    )
                    // /payrolls/pay
                    .service(web::resource("/pay").route(web::post().to(payroll::pay_payrolls)))
                    // /payrolls/period-end
                    .service(
                        web::resource("/period-end").route(web::get().to(payroll::period_end)),
                    ),
            )
            .service(web::resource("/payments").route(web::get().to(payments::list_payments)))
            .service(
                web::scope("/users")
                    .service(
                        web::resource("")
                            .route(web::get().to(users::list_users))
                            .route(web::post().to(users::create_user)),
                    )
                    // /users/employees
                    .service(
                        web::resource("/employees")
                            .route(web::get().to(employee::list_employees)),
                    )
                    // /users/employees/{id}
                    .service(
                        web::resource("/employees/{id}")
                            .route(web::get().to(employee::get_employee))
                            .route(web::put().to(employee::update_employee)),
                    )
                    .service(web::resource("/{id}").route(web::put().to(users::update_user)))
                    .service(
                        web::resource("/{id}/deactivate")
                            .route(web::put().to(users::deactivate_user)),
                    ),
            )
            .service(
                web::resource("/performance-evaluations")
                    .route(web::get().to(performance::list_evaluations))
                    .route(web::post().to(performance::create_evaluation)),
            )
            .service(
                web::scope("/vacations")
                    .service(
                        web::resource("")
                            .route(web::get().to(vacation::list_vacations))
                            .route(web::post().to(vacation::request_vacation)),
                    )
                    .service(web::resource("/balance").route(web::get().to(vacation::balance)))
                    .service(web::resource("/accrue").route(web::post().to(vacation::accrue)))
                    .service(
                        web::resource("/{id}/approve").route(web::put().to(vacation::approve)),
                    )
                    .service(
                        web::resource("/{id}/decline").route(web::put().to(vacation::decline)),
                    ),
            )
            .service(
                web::scope("/reports")
                    .service(web::resource("").route(web::get().to(report::payroll_report)))
                    .service(web::resource("/export").route(web::get().to(report::export))),
            ),
    );
}
