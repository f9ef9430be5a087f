// Fixed collection names, status codes and client-facing messages

/// Database holding the mflix sample data set
pub const DEFAULT_DATABASE: &str = "sample_mflix";

pub const MOVIES_COLLECTION: &str = "movies";
pub const COMMENTS_COLLECTION: &str = "comments";

/// Maximum number of documents returned by any list operation
pub const LIST_LIMIT: i64 = 10;

/// Field on a comment referencing its movie
pub const REFERENCE_FIELD: &str = "movie_id";
/// Creation timestamp stamped on documents carrying a reference
pub const CREATED_AT_FIELD: &str = "date";
pub const ID_FIELD: &str = "_id";

// Status codes
pub const STATUS_OK: u16 = 200;
pub const STATUS_CREATED: u16 = 201;
pub const STATUS_DELETED: u16 = 204;
pub const STATUS_INVALID_ID: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_NOT_ALLOWED: u16 = 405;
pub const STATUS_INTERNAL_ERROR: u16 = 500;
pub const STATUS_UNAVAILABLE: u16 = 503;

// Common messages
pub const METHOD_NOT_ALLOWED_MESSAGE: &str = "Méthode non autorisée.";
pub const INVALID_ID_MESSAGE: &str = "Identifiant invalide.";
pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Erreur interne au niveau du serveur.";
pub const DOCUMENT_BODY_REQUIRED_MESSAGE: &str =
    "Au moins un champ est à renseigner pour créer l'objet.";
pub const INVALID_BODY_MESSAGE: &str = "Corps de requête invalide.";
pub const DATABASE_UNAVAILABLE_MESSAGE: &str = "Base de données indisponible.";

// Movies
pub const MOVIE_CREATED_MESSAGE: &str = "Film ajouté avec succès.";
pub const MOVIE_NOT_FOUND_MESSAGE: &str = "Film introuvable.";
pub const MOVIE_ID_REQUIRED_MESSAGE: &str = "ID du film requis";
pub const MOVIE_EDITED_MESSAGE: &str = "Film modifié avec succès.";
pub const MOVIE_DELETED_MESSAGE: &str = "Film supprimé avec succès.";

// Comments
pub const COMMENT_CREATED_MESSAGE: &str = "Commentaire ajouté avec succès.";
pub const COMMENT_NOT_FOUND_MESSAGE: &str = "Commentaire introuvable.";
pub const COMMENT_EDITED_MESSAGE: &str = "Commentaire modifié avec succès.";
pub const COMMENT_DELETED_MESSAGE: &str = "Commentaire supprimé avec succès.";
