//! OpenAPI description of the `/api` routes, served as JSON at [`OPENAPI_PATH`].
//!
//! The resource handlers are generic over [`Resource`](crate::handlers::Resource),
//! so each route and verb is described by its own operation in `paths`.

use axum::Json;
use serde_json::Value;
use utoipa::openapi::OpenApi as OpenApiDocument;
use utoipa::{OpenApi, ToSchema};

use crate::database::InsertResult;
use crate::handlers::comments::{CommentPatch, NewComment};
use crate::handlers::movies::MoviePayload;

pub const OPENAPI_PATH: &str = "/api-doc/openapi.json";

/// `{status, data: [...]}`
#[derive(ToSchema)]
pub struct DocumentListBody {
    pub status: u16,
    #[schema(value_type = Vec<Object>)]
    pub data: Vec<Value>,
}

/// `{status, data: {...}}`
#[derive(ToSchema)]
pub struct DocumentBody {
    pub status: u16,
    #[schema(value_type = Object)]
    pub data: Value,
}

/// `{status, message, result}` returned on creation
#[derive(ToSchema)]
pub struct CreatedBody {
    pub status: u16,
    pub message: String,
    pub result: InsertResult,
}

/// `{status, message}` used by confirmations and every error
#[derive(ToSchema)]
pub struct MessageBody {
    pub status: u16,
    pub message: String,
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "mflix API",
        description = "Opérations CRUD sur les collections movies et comments de sample_mflix"
    ),
    paths(
        paths::list_movies,
        paths::create_movie,
        paths::show_movie,
        paths::update_movie,
        paths::delete_movie,
        paths::list_comments,
        paths::create_comment,
        paths::show_comment,
        paths::update_comment,
        paths::delete_comment,
    ),
    components(schemas(
        MoviePayload,
        NewComment,
        CommentPatch,
        InsertResult,
        DocumentListBody,
        DocumentBody,
        CreatedBody,
        MessageBody,
    )),
    tags(
        (name = "Films", description = "Opérations liées aux films"),
        (name = "Commentaires", description = "Opérations liées aux commentaires"),
    )
)]
pub struct ApiDoc;

/// GET /api-doc/openapi.json
pub async fn openapi_document() -> Json<OpenApiDocument> {
    Json(ApiDoc::openapi())
}

#[allow(dead_code)]
mod paths {
    use super::{
        CommentPatch, CreatedBody, DocumentBody, DocumentListBody, MessageBody, MoviePayload,
        NewComment,
    };

    /// Récupère les films en base de données.
    ///
    /// Au plus 10 films, dans l'ordre naturel de la collection.
    #[utoipa::path(
        get,
        path = "/api/movies",
        tag = "Films",
        responses(
            (status = 200, description = "Liste des films", body = DocumentListBody),
            (status = 405, description = "Méthode non autorisée.", body = MessageBody),
            (status = 500, description = "Erreur interne", body = MessageBody),
        )
    )]
    pub fn list_movies() {}

    /// Ajoute un nouveau film à la base de données.
    #[utoipa::path(
        post,
        path = "/api/movies",
        tag = "Films",
        request_body = MoviePayload,
        responses(
            (status = 201, description = "Film ajouté avec succès.", body = CreatedBody),
            (status = 400, description = "Corps vide ou invalide", body = MessageBody),
            (status = 500, description = "Erreur interne", body = MessageBody),
        )
    )]
    pub fn create_movie() {}

    /// Récupère un film par son identifiant.
    #[utoipa::path(
        get,
        path = "/api/movie/{id}",
        tag = "Films",
        params(("id" = String, Path, description = "ObjectId du film")),
        responses(
            (status = 200, description = "Le film", body = DocumentBody),
            (status = 400, description = "Identifiant invalide.", body = MessageBody),
            (status = 404, description = "Film introuvable.", body = MessageBody),
        )
    )]
    pub fn show_movie() {}

    /// Met à jour un film par son identifiant.
    ///
    /// Seuls les champs fournis sont modifiés.
    #[utoipa::path(
        put,
        path = "/api/movie/{id}",
        tag = "Films",
        params(("id" = String, Path, description = "ObjectId du film")),
        request_body = MoviePayload,
        responses(
            (status = 200, description = "Film modifié avec succès.", body = MessageBody),
            (status = 400, description = "Identifiant ou corps invalide", body = MessageBody),
            (status = 404, description = "Film introuvable.", body = MessageBody),
        )
    )]
    pub fn update_movie() {}

    /// Supprime un film par son identifiant.
    #[utoipa::path(
        delete,
        path = "/api/movie/{id}",
        tag = "Films",
        params(("id" = String, Path, description = "ObjectId du film")),
        responses(
            (status = 204, description = "Film supprimé avec succès."),
            (status = 400, description = "Identifiant invalide.", body = MessageBody),
            (status = 404, description = "Film introuvable.", body = MessageBody),
        )
    )]
    pub fn delete_movie() {}

    /// Récupère les commentaires d'un film par son identifiant.
    #[utoipa::path(
        get,
        path = "/api/movie/comments",
        tag = "Commentaires",
        params(("movie_id" = String, Query, description = "ObjectId du film")),
        responses(
            (status = 200, description = "Au plus 10 commentaires", body = DocumentListBody),
            (status = 400, description = "ID du film requis", body = MessageBody),
        )
    )]
    pub fn list_comments() {}

    /// Ajoute un nouveau commentaire pour un film.
    ///
    /// `movie_id` est obligatoire ; la date est renseignée par le serveur.
    #[utoipa::path(
        post,
        path = "/api/movie/comments",
        tag = "Commentaires",
        request_body = NewComment,
        responses(
            (status = 201, description = "Commentaire ajouté avec succès.", body = CreatedBody),
            (status = 400, description = "ID du film requis", body = MessageBody),
        )
    )]
    pub fn create_comment() {}

    /// Récupère un commentaire par son identifiant.
    #[utoipa::path(
        get,
        path = "/api/movie/comment/{id}",
        tag = "Commentaires",
        params(("id" = String, Path, description = "ObjectId du commentaire")),
        responses(
            (status = 200, description = "Le commentaire", body = DocumentBody),
            (status = 400, description = "Identifiant invalide.", body = MessageBody),
            (status = 404, description = "Commentaire introuvable.", body = MessageBody),
        )
    )]
    pub fn show_comment() {}

    /// Met à jour un commentaire par son identifiant.
    #[utoipa::path(
        put,
        path = "/api/movie/comment/{id}",
        tag = "Commentaires",
        params(("id" = String, Path, description = "ObjectId du commentaire")),
        request_body = CommentPatch,
        responses(
            (status = 200, description = "Commentaire modifié avec succès.", body = MessageBody),
            (status = 400, description = "Identifiant ou corps invalide", body = MessageBody),
            (status = 404, description = "Commentaire introuvable.", body = MessageBody),
        )
    )]
    pub fn update_comment() {}

    /// Supprime un commentaire par son identifiant.
    #[utoipa::path(
        delete,
        path = "/api/movie/comment/{id}",
        tag = "Commentaires",
        params(("id" = String, Path, description = "ObjectId du commentaire")),
        responses(
            (status = 204, description = "Commentaire supprimé avec succès."),
            (status = 400, description = "Identifiant invalide.", body = MessageBody),
            (status = 404, description = "Commentaire introuvable.", body = MessageBody),
        )
    )]
    pub fn delete_comment() {}
}
