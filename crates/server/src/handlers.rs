use crate::reject;
use actix_web::HttpResponse;
use actix_web::Responder;
use actix_web::web;
use chrono::Utc;
use mls_core::*;
use mls_dto::*;
use mls_lifecycle::Current;
use mls_lifecycle::Manager;

pub async fn root() -> impl Responder {
    HttpResponse::Ok().json(ServiceDescriptor::default())
}
pub async fn health(manager: web::Data<Manager>) -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        status: "healthy".to_string(),
        timestamp: Utc::now(),
        model_loaded: manager.is_loaded().await,
        service: SERVICE_NAME.to_string(),
    })
}
pub async fn train(manager: web::Data<Manager>, req: web::Json<TrainingRequest>) -> impl Responder {
    match req.validate() {
        Err(e) => reject(&manager, e),
        Ok(()) => match manager.train(&req).await {
            Err(e) => reject(&manager, e),
            Ok(trained) => HttpResponse::Ok().json(trained),
        },
    }
}
pub async fn predict(manager: web::Data<Manager>, req: web::Json<PredictionRequest>) -> impl Responder {
    match req.validate() {
        Err(e) => reject(&manager, e),
        Ok(()) => match manager.predict(&req).await {
            Err(e) => reject(&manager, e),
            Ok(prediction) => HttpResponse::Ok().json(prediction),
        },
    }
}
pub async fn model_info(manager: web::Data<Manager>) -> impl Responder {
    match manager.describe().await {
        Err(e) => reject(&manager, e),
        Ok(info) => HttpResponse::Ok().json(info),
    }
}
pub async fn drift(manager: web::Data<Manager>) -> impl Responder {
    match manager.drift(Current::Perturbed).await {
        Err(e) => reject(&manager, e),
        Ok(report) => HttpResponse::Ok().json(report),
    }
}
pub async fn drift_with(manager: web::Data<Manager>, req: web::Json<DriftRequest>) -> impl Responder {
    match req.validate() {
        Err(e) => reject(&manager, e),
        Ok(()) => match manager.drift(Current::Supplied(req.into_inner().rows)).await {
            Err(e) => reject(&manager, e),
            Ok(report) => HttpResponse::Ok().json(report),
        },
    }
}
pub async fn metrics(manager: web::Data<Manager>) -> impl Responder {
    HttpResponse::Ok().json(manager.metrics().await)
}
