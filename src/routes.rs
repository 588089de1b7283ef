use crate::{
    api::{excel, frequencia, funcionario, logs, relatorio},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Limitador por rota, chaveado pelo IP do cliente
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

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let register_limiter = Arc::new(build_limiter(config.rate_register_per_min));
    let refresh_limiter = Arc::new(build_limiter(config.rate_refresh_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Rotas públicas
    cfg.service(
        web::scope("/auth")
            .service(
                web::resource("/login")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::login)),
            )
            .service(
                web::resource("/register")
                    .wrap(register_limiter.clone())
                    .route(web::post().to(handlers::register)),
            )
            .service(
                web::resource("/refresh")
                    .wrap(refresh_limiter.clone())
                    .route(web::post().to(handlers::refresh_token)),
            )
            .service(
                web::resource("/logout")
                    .wrap(login_limiter.clone())
                    .route(web::post().to(handlers::logout)),
            ),
    );

    // Rotas protegidas
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware))
            .wrap(protected_limiter)
            .service(
                web::scope("/funcionarios")
                    // /funcionarios
                    .service(
                        web::resource("")
                            .route(web::post().to(funcionario::create))
                            .route(web::get().to(funcionario::listar)),
                    )
                    // /funcionarios/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(funcionario::get))
                            .route(web::put().to(funcionario::update))
                            .route(web::delete().to(funcionario::delete)),
                    ),
            )
            .service(
                web::scope("/frequencia")
                    // /frequencia
                    .service(
                        web::resource("")
                            .route(web::post().to(frequencia::create))
                            .route(web::get().to(frequencia::listar)),
                    )
                    // /frequencia/funcionario/{id}/mes/{ano}/{mes}
                    .service(
                        web::resource("/funcionario/{funcionario_id}/mes/{ano}/{mes}")
                            .route(web::get().to(frequencia::listar_mes)),
                    )
                    // /frequencia/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::get().to(frequencia::get))
                            .route(web::put().to(frequencia::update))
                            .route(web::delete().to(frequencia::delete)),
                    ),
            )
            .service(
                web::scope("/relatorios")
                    .service(web::resource("").route(web::post().to(relatorio::gerar))),
            )
            .service(
                web::scope("/excel")
                    .service(
                        web::resource("/frequencia/import")
                            .route(web::post().to(excel::import_frequencia)),
                    )
                    .service(
                        web::resource("/frequencia/export")
                            .route(web::get().to(excel::export_frequencia)),
                    )
                    .service(
                        web::resource("/funcionarios/export")
                            .route(web::get().to(excel::export_funcionarios)),
                    ),
            )
            .service(
                web::scope("/logs").service(web::resource("").route(web::get().to(logs::listar))),
            ),
    );
}
