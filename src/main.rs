use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter
use std::sync::Arc;

use descanso_backend::{
    config::Config,
    database::{create_pool, run_migrations},
    handlers,
    middlewares::{AuthMiddleware, create_cors},
    services::*,
    swagger::swagger_config,
    utils::JwtService,
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            let ts = Local::now().format("%Y-%m-%dT%H:%M:%S%.3f%:z");
            let level = record.level().as_str().to_ascii_lowercase();
            let msg_json = serde_json::to_string(&format!("{}", record.args()))
                .unwrap_or_else(|_| "\"<invalid utf8>\"".to_string());
            writeln!(
                buf,
                "{{\"timestamp\":\"{}\",\"level\":\"{}\",\"message\":{},\"target\":\"{}\"}}",
                ts,
                level,
                msg_json,
                record.target(),
            )
        })
        .target(Target::Stdout)
        .init();

    // 加载配置
    let config = Config::from_toml().expect("Failed to load configuration");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");
    let pool = Arc::new(pool);

    let jwt_service = JwtService::new(&config.jwt.secret);
    let base_days = config.vacation.base_days;

    // 创建服务
    let profile_service = ProfileService::new(pool.clone());
    let vacation_service = VacationService::new(pool.clone(), base_days);
    let holiday_service = HolidayService::new(pool.clone());
    let birthday_service = BirthdayService::new(pool);
    let year_view_service = YearViewService::new(
        vacation_service.clone(),
        holiday_service.clone(),
        birthday_service.clone(),
        base_days,
    );
    let calendar_service = CalendarService::new(
        vacation_service.clone(),
        holiday_service.clone(),
        birthday_service.clone(),
        profile_service.clone(),
    );

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{} ({} vacation days per year)",
        config.server.host,
        config.server.port,
        base_days
    );

    let allowed_origins = config.server.allowed_origins.clone();
    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .wrap(create_cors(&allowed_origins))
            .app_data(web::Data::new(profile_service.clone()))
            .app_data(web::Data::new(vacation_service.clone()))
            .app_data(web::Data::new(holiday_service.clone()))
            .app_data(web::Data::new(birthday_service.clone()))
            .app_data(web::Data::new(year_view_service.clone()))
            .app_data(web::Data::new(calendar_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::user_config)
                    .configure(handlers::vacation_config)
                    .configure(handlers::holiday_config)
                    .configure(handlers::birthday_config)
                    .configure(handlers::calendar_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
