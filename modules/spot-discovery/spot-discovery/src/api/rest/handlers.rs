use std::sync::Arc;

use axum::Json;
use axum::extract::{Extension, Path, Query};
use http::StatusCode;
use spot_discovery_sdk::api::SpotDiscoveryApi;
use uuid::Uuid;

use super::dto::{
    CatalogStatusDto, CommentRequest, CourseDto, FavoriteDto, FavoriteStateDto, HomeFeedDto,
    ReviewDto, SearchQuery, SearchResponse, SpotDto, TagDto, TagsQuery, ToggleResponse,
    VoteRequest, VoteSummaryDto,
};
use super::error::{ApiResult, Problem};
use super::session::Session;

pub type Api = Arc<dyn SpotDiscoveryApi>;

fn parse_review_id(raw: &str) -> ApiResult<Uuid> {
    Uuid::parse_str(raw).map_err(|_| Problem::bad_request(format!("invalid review id '{raw}'")))
}

fn reviews(list: Vec<spot_discovery_sdk::models::Review>) -> Vec<ReviewDto> {
    list.into_iter().map(Into::into).collect()
}

pub async fn catalog_status(Extension(api): Extension<Api>) -> Json<CatalogStatusDto> {
    Json(api.catalog_status().await.into())
}

pub async fn search_spots(
    Extension(api): Extension<Api>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<SearchResponse>> {
    let outcome = api.search(&query.into()).await?;
    Ok(Json(outcome.into()))
}

pub async fn get_spot(
    Extension(api): Extension<Api>,
    Path(id): Path<String>,
) -> ApiResult<Json<SpotDto>> {
    Ok(Json(api.get_spot(&id).await?.into()))
}

pub async fn home_feed(Extension(api): Extension<Api>) -> ApiResult<Json<HomeFeedDto>> {
    Ok(Json(api.home_feed().await?.into()))
}

pub async fn list_courses(Extension(api): Extension<Api>) -> ApiResult<Json<Vec<CourseDto>>> {
    let courses = api.list_courses().await?;
    Ok(Json(courses.into_iter().map(Into::into).collect()))
}

pub async fn get_course(
    Extension(api): Extension<Api>,
    Path(id): Path<String>,
) -> ApiResult<Json<CourseDto>> {
    Ok(Json(api.get_course(&id).await?.into()))
}

pub async fn list_tags(
    Extension(api): Extension<Api>,
    Query(query): Query<TagsQuery>,
) -> ApiResult<Json<Vec<TagDto>>> {
    let tags = api.list_tags(query.filter()).await?;
    Ok(Json(tags.into_iter().map(Into::into).collect()))
}

pub async fn list_favorites(
    Session(ctx): Session,
    Extension(api): Extension<Api>,
) -> ApiResult<Json<Vec<FavoriteDto>>> {
    let favorites = api.list_favorites(&ctx).await?;
    Ok(Json(favorites.into_iter().map(Into::into).collect()))
}

pub async fn favorite_state(
    Session(ctx): Session,
    Extension(api): Extension<Api>,
    Path(id): Path<String>,
) -> Json<FavoriteStateDto> {
    Json(FavoriteStateDto {
        is_favorite: api.is_favorite(&ctx, Some(&id)).await,
    })
}

pub async fn toggle_favorite(
    Session(ctx): Session,
    Extension(api): Extension<Api>,
    Json(req): Json<FavoriteDto>,
) -> ApiResult<Json<ToggleResponse>> {
    Ok(Json(api.toggle_favorite(&ctx, req.into()).await?.into()))
}

pub async fn list_reviews(
    Extension(api): Extension<Api>,
    Path(spot_id): Path<String>,
) -> ApiResult<Json<Vec<ReviewDto>>> {
    Ok(Json(reviews(api.list_reviews(&spot_id).await?)))
}

pub async fn visible_reviews(
    Extension(api): Extension<Api>,
    Path(spot_id): Path<String>,
) -> ApiResult<Json<Vec<ReviewDto>>> {
    Ok(Json(reviews(api.visible_reviews(&spot_id).await?)))
}

pub async fn add_comment(
    Session(ctx): Session,
    Extension(api): Extension<Api>,
    Path(spot_id): Path<String>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<(StatusCode, Json<ReviewDto>)> {
    let review = api.add_comment(&ctx, &spot_id, &req.text).await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

pub async fn add_vote(
    Session(ctx): Session,
    Extension(api): Extension<Api>,
    Path(spot_id): Path<String>,
    Json(req): Json<VoteRequest>,
) -> ApiResult<(StatusCode, Json<ReviewDto>)> {
    let review = api.add_vote(&ctx, &spot_id, req.direction.into()).await?;
    Ok((StatusCode::CREATED, Json(review.into())))
}

pub async fn vote_summary(
    Session(ctx): Session,
    Extension(api): Extension<Api>,
    Path(spot_id): Path<String>,
) -> Json<VoteSummaryDto> {
    Json(api.vote_summary(&ctx, &spot_id).await.into())
}

pub async fn edit_comment(
    Session(ctx): Session,
    Extension(api): Extension<Api>,
    Path((spot_id, review_id)): Path<(String, String)>,
    Json(req): Json<CommentRequest>,
) -> ApiResult<Json<ReviewDto>> {
    let review_id = parse_review_id(&review_id)?;
    let review = api.edit_comment(&ctx, &spot_id, review_id, &req.text).await?;
    Ok(Json(review.into()))
}

pub async fn delete_review(
    Session(ctx): Session,
    Extension(api): Extension<Api>,
    Path((spot_id, review_id)): Path<(String, String)>,
) -> ApiResult<StatusCode> {
    let review_id = parse_review_id(&review_id)?;
    api.delete_review(&ctx, &spot_id, review_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
