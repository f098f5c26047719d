//! Character Annotation Service

use std::sync::{Mutex, PoisonError};
use std::time::Instant;

use zhuji::ZhujiService;
use zhuji::errors::ZhujiError;
use zhuji::models::is_cjk;

use crate::config::{Config, MAX_TEXT_LENGTH};
use crate::errors::{ApiError, Result};
use crate::models::{
  AnnotateRequest, AnnotateResponse, CharacterDto, CreateListRequest, ListCharacterRequest, ListResponse,
  ListUpdateResponse, ListsResponse,
};

/// Common interface for the annotation service
///
/// This trait allows swapping production implementation (`ZhujiApiServiceFull`) with
/// test stubs/mocks.
pub trait ZhujiApiService: Send + Sync {
  /// Processes the text and returns the details of its characters
  ///
  /// # Errors
  /// - Input error (empty string, length exceeded, etc.)
  /// - Storage error (corrupt or unwritable cache)
  fn annotate(&self, request: AnnotateRequest) -> Result<AnnotateResponse>;

  /// Returns the cached record of one character
  fn character(&self, character: &str) -> Result<CharacterDto>;

  /// Returns all list names
  fn lists(&self) -> Result<ListsResponse>;

  /// Creates an empty list
  fn create_list(&self, request: CreateListRequest) -> Result<ListUpdateResponse>;

  /// Deletes a list (`Favorites` is kept)
  fn delete_list(&self, name: &str) -> Result<ListUpdateResponse>;

  /// Returns the characters of a list
  fn list(&self, name: &str) -> Result<ListResponse>;

  /// Adds a character to a list, creating the list if needed
  fn add_to_list(&self, name: &str, request: ListCharacterRequest) -> Result<ListUpdateResponse>;

  /// Removes a character from a list
  fn remove_from_list(&self, name: &str, character: &str) -> Result<ListUpdateResponse>;
}

/// Parses a path or body value that must be exactly one CJK character
pub fn parse_character(value: &str) -> Result<char> {
  let mut chars = value.trim().chars();
  match (chars.next(), chars.next()) {
    (Some(c), None) if is_cjk(c) => Ok(c),
    _ => Err(ApiError::invalid_input(format!("not a single CJK character: {value:?}"))),
  }
}

/// Annotation Service
///
/// Processing passes and list mutations are serialized; reads run concurrently.
pub struct ZhujiApiServiceFull {
  /// Library facade
  inner: ZhujiService,
  /// Serializes read-modify-write operations on the cache and list files
  write_lock: Mutex<()>,
}

impl ZhujiApiServiceFull {
  /// Initializes the service
  ///
  /// The dictionary is loaded lazily on the first request that needs it.
  ///
  /// # Errors
  /// Returns an error if the configuration is invalid
  pub fn new(config: &Config) -> Result<Self> {
    let inner = ZhujiService::init(&config.zhuji)?;
    Ok(Self::from_service(inner))
  }

  /// Wraps an already initialized library service
  #[must_use]
  pub fn from_service(inner: ZhujiService) -> Self {
    Self {
      inner,
      write_lock: Mutex::new(()),
    }
  }

  /// Processes the text and returns the details of its characters
  ///
  /// # Errors
  /// - If text is empty or whitespace only
  /// - If text exceeds maximum length
  /// - If the cache cannot be read or written
  pub fn annotate(&self, request: AnnotateRequest) -> Result<AnnotateResponse> {
    // Validate text length
    let text_bytes = request.text.len();
    if request.text.trim().is_empty() {
      return Err(ApiError::invalid_input("Text is empty"));
    }

    if text_bytes > MAX_TEXT_LENGTH {
      return Err(ApiError::text_too_long(text_bytes, MAX_TEXT_LENGTH));
    }

    // Start measuring processing time
    let start = Instant::now();

    let report = {
      let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
      self.inner.process_text(&request.text)?
    };

    let characters = self
      .inner
      .details(&request.text)?
      .into_iter()
      .map(|(c, record)| CharacterDto::from_record(c, record))
      .collect();
    let full_pinyin = self.inner.full_pinyin(&request.text);

    // End measuring processing time
    let elapsed_ms = start.elapsed().as_millis() as u64;

    Ok(AnnotateResponse::new(report, characters, full_pinyin, elapsed_ms))
  }

  fn mutate_lists<T>(&self, change: impl FnOnce(&ZhujiService) -> zhuji::ZhujiResult<T>) -> Result<T> {
    let _guard = self.write_lock.lock().unwrap_or_else(PoisonError::into_inner);
    Ok(change(&self.inner)?)
  }
}

/// Production implementation of trait `ZhujiApiService`
impl ZhujiApiService for ZhujiApiServiceFull {
  fn annotate(&self, request: AnnotateRequest) -> Result<AnnotateResponse> {
    // Note: Writing `self.annotate(...)` would recursively call the trait method,
    // so explicitly call the inherent method.
    ZhujiApiServiceFull::annotate(self, request)
  }

  fn character(&self, character: &str) -> Result<CharacterDto> {
    let c = parse_character(character)?;
    match self.inner.character(c)? {
      Some(record) => Ok(CharacterDto::from_record(c, record)),
      None => Err(ApiError::not_found(format!("character not annotated yet: {c}"))),
    }
  }

  fn lists(&self) -> Result<ListsResponse> {
    Ok(ListsResponse {
      lists: self.inner.lists().list_names().map_err(ZhujiError::from)?,
    })
  }

  fn create_list(&self, request: CreateListRequest) -> Result<ListUpdateResponse> {
    let name = request.name.trim().to_string();
    let changed = self.mutate_lists(|service| Ok(service.lists().create_list(&name)?))?;
    Ok(ListUpdateResponse { name, changed })
  }

  fn delete_list(&self, name: &str) -> Result<ListUpdateResponse> {
    let changed = self.mutate_lists(|service| {
      if service.lists().characters_in(name)?.is_none() {
        return Ok(None);
      }
      Ok(Some(service.lists().delete_list(name)?))
    })?;

    match changed {
      Some(changed) => Ok(ListUpdateResponse {
        name: name.trim().to_string(),
        changed,
      }),
      None => Err(ApiError::not_found(format!("list not found: {name}"))),
    }
  }

  fn list(&self, name: &str) -> Result<ListResponse> {
    match self.inner.lists().characters_in(name).map_err(ZhujiError::from)? {
      Some(characters) => Ok(ListResponse {
        name: name.trim().to_string(),
        characters: characters.iter().map(char::to_string).collect(),
      }),
      None => Err(ApiError::not_found(format!("list not found: {name}"))),
    }
  }

  fn add_to_list(&self, name: &str, request: ListCharacterRequest) -> Result<ListUpdateResponse> {
    let c = parse_character(&request.character)?;
    let changed = self.mutate_lists(|service| Ok(service.lists().add(name, c)?))?;
    Ok(ListUpdateResponse {
      name: name.trim().to_string(),
      changed,
    })
  }

  fn remove_from_list(&self, name: &str, character: &str) -> Result<ListUpdateResponse> {
    let c = parse_character(character)?;
    let changed = self.mutate_lists(|service| Ok(service.lists().remove(name, c)?))?;
    Ok(ListUpdateResponse {
      name: name.trim().to_string(),
      changed,
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::TempDir;
  use zhuji::ZhujiConfig;
  use zhuji::lists::FAVORITES;

  const DICTIONARY: &str = "你 你 [ni3] /you/\n好 好 [hao3] /good/\n你好 你好 [ni3 hao3] /hello/\n";

  fn create_service() -> (TempDir, ZhujiApiServiceFull) {
    let temp_dir = TempDir::new().unwrap();
    let zhuji = ZhujiConfig::in_dir(temp_dir.path());
    std::fs::write(zhuji.dictionary_path(), DICTIONARY).unwrap();

    let config = Config {
      bind_addr: "127.0.0.1:5531".to_string(),
      zhuji,
    };
    let service = ZhujiApiServiceFull::new(&config).unwrap();
    (temp_dir, service)
  }

  #[test]
  fn parse_character_accepts_single_cjk() {
    assert_eq!(parse_character("好").unwrap(), '好');
    assert_eq!(parse_character(" 好 ").unwrap(), '好');
    assert_eq!(parse_character("你好").unwrap_err().code(), "invalid_input");
    assert_eq!(parse_character("a").unwrap_err().code(), "invalid_input");
    assert_eq!(parse_character("").unwrap_err().code(), "invalid_input");
  }

  #[test]
  fn annotate_returns_details_and_pinyin() {
    let (_temp_dir, service) = create_service();

    let response = service.annotate(AnnotateRequest {
      text: "你好!".to_string(),
    });
    let response = response.unwrap();

    assert_eq!(response.added, vec!["你", "好"]);
    assert_eq!(response.full_pinyin, "nǐ hǎo !");
    assert_eq!(response.characters.len(), 2);
    assert_eq!(response.characters[0].meaning, "you");
    assert_eq!(response.characters[1].compounds[0].word, "你好");
  }

  #[test]
  fn test_empty_text_error() {
    let (_temp_dir, service) = create_service();
    let result = service.annotate(AnnotateRequest {
      text: "  ".to_string(),
    });
    assert_eq!(result.unwrap_err().code(), "invalid_input");
  }

  #[test]
  fn test_text_too_long_error() {
    let (_temp_dir, service) = create_service();
    let long_text = "a".repeat(MAX_TEXT_LENGTH + 1);
    let result = service.annotate(AnnotateRequest { text: long_text });
    assert_eq!(result.unwrap_err().code(), "text_too_long");
  }

  #[test]
  fn character_lookup() {
    let (_temp_dir, service) = create_service();
    assert_eq!(service.character("你").unwrap_err().code(), "not_found");

    service
      .annotate(AnnotateRequest {
        text: "你".to_string(),
      })
      .unwrap();
    assert_eq!(service.character("你").unwrap().pinyin, "nǐ");
  }

  #[test]
  fn list_lifecycle() {
    let (_temp_dir, service) = create_service();

    let created = service.create_list(CreateListRequest { name: "HSK1".to_string() }).unwrap();
    assert!(created.changed);

    let added = service
      .add_to_list("HSK1", ListCharacterRequest {
        character: "好".to_string(),
      })
      .unwrap();
    assert!(added.changed);
    assert_eq!(service.list("HSK1").unwrap().characters, vec!["好"]);

    assert!(service.remove_from_list("HSK1", "好").unwrap().changed);
    assert!(service.delete_list("HSK1").unwrap().changed);
    assert_eq!(service.list("HSK1").unwrap_err().code(), "not_found");
    assert_eq!(service.delete_list("HSK1").unwrap_err().code(), "not_found");
  }

  #[test]
  fn favorites_survives_delete() {
    let (_temp_dir, service) = create_service();

    let response = service.delete_list(FAVORITES).unwrap();
    assert!(!response.changed);
    assert!(service.lists().unwrap().lists.contains(&FAVORITES.to_string()));
  }
}
