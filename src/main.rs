use actix_web::{App, HttpServer, middleware::Logger, web};
use chrono::Local; // timestamp in log lines
use env_logger::{Env, Target};
use std::io::Write; // for env_logger custom formatter

use ddblog_backend::{
    config::Config,
    database::{create_pool, run_migrations, seed_all},
    events::{post_event_channel, spawn_post_event_listener},
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
    let config = Config::from_toml().expect("Failed to load configuration file");

    // 创建数据库连接池
    let pool = create_pool(&config.database)
        .await
        .expect("Failed to create database connection pool");

    // 运行数据库迁移
    run_migrations(&pool)
        .await
        .expect("Failed to run database migrations");

    // 种子数据：板块与积分商店商品
    seed_all(&pool).await.expect("Failed to seed initial data");

    // 创建JWT服务
    let jwt_service = JwtService::new(
        &config.jwt.secret,
        config.jwt.access_token_expires_in,
        config.jwt.refresh_token_expires_in,
    );

    // 创建服务
    let auth_service = AuthService::new(pool.clone(), jwt_service.clone());
    let user_service = UserService::new(pool.clone());
    let point_service = PointService::new(pool.clone());
    let verification_service = VerificationService::new(pool.clone());
    let comment_service = CommentService::new(pool.clone());
    let post_like_service = PostLikeService::new(pool.clone());
    let follow_service = FollowService::new(pool.clone());
    let point_store_service = PointStoreService::new(pool.clone());
    let report_service = ReportService::new(pool.clone());
    let admin_service = AdminService::new(pool.clone(), point_service.clone());

    // 发帖事件通道：发帖事务提交后由监听任务结算积分（尽力而为）
    let (post_events, post_events_rx) = post_event_channel();
    spawn_post_event_listener(point_service.clone(), post_events_rx);

    let post_service = PostService::new(pool.clone(), verification_service.clone(), post_events);

    // 启动HTTP服务器
    log::info!(
        "Starting HTTP server at {}:{}",
        config.server.host,
        config.server.port
    );

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(create_cors())
            .wrap(AuthMiddleware::new(jwt_service.clone()))
            .app_data(web::Data::new(auth_service.clone()))
            .app_data(web::Data::new(user_service.clone()))
            .app_data(web::Data::new(post_service.clone()))
            .app_data(web::Data::new(comment_service.clone()))
            .app_data(web::Data::new(post_like_service.clone()))
            .app_data(web::Data::new(follow_service.clone()))
            .app_data(web::Data::new(verification_service.clone()))
            .app_data(web::Data::new(point_service.clone()))
            .app_data(web::Data::new(point_store_service.clone()))
            .app_data(web::Data::new(report_service.clone()))
            .app_data(web::Data::new(admin_service.clone()))
            .configure(swagger_config)
            .service(
                web::scope("/api/v1")
                    .configure(handlers::auth_config)
                    .configure(handlers::user_config)
                    .configure(handlers::post_config)
                    .configure(handlers::comment_config)
                    .configure(handlers::follow_config)
                    .configure(handlers::verification_config)
                    .configure(handlers::point_config)
                    .configure(handlers::report_config)
                    .configure(handlers::admin_config),
            )
    })
    .bind((config.server.host.as_str(), config.server.port))?
    .run()
    .await
}
