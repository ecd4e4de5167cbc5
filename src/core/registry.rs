//! # Service Registry - 싱글톤 의존성 주입 컨테이너
//!
//! `#[service]` / `#[repository]` 매크로가 만들어 내는 등록 정보를 모아
//! 타입별 싱글톤 인스턴스를 생성하고 보관합니다.
//!
//! ## 동작 방식
//!
//! ```text
//! 1. 컴파일 타임
//!    ├─ #[repository(name = "recipe", collection = "recipes")] → RepositoryRegistration
//!    ├─ #[service(name = "recipe")]                            → ServiceRegistration
//!    └─ inventory::collect! 로 전역 목록에 수집
//!
//! 2. 기동 시점 (main)
//!    ├─ ServiceLocator::set(Arc<Database>), ServiceLocator::set(Arc<RedisClient>)
//!    └─ ServiceLocator::initialize_all() → 모든 리포지토리, 서비스 생성
//!
//! 3. 요청 처리 중
//!    └─ RecipeService::instance() → ServiceLocator::get::<RecipeService>() → 캐시된 Arc 반환
//! ```
//!
//! ## 이름 규칙
//!
//! 타입 이름에서 `Repository` / `Service` 접미사를 떼고 소문자로 바꾼 값이
//! 매크로의 `name` 인자와 같아야 합니다.
//!
//! | 타입 | name |
//! |------|------|
//! | `RecipeRepository` | `"recipe"` |
//! | `CartService` | `"cart"` |
//! | `FollowRepository` | `"follow"` |
//!
//! 그래서 이 크레이트의 컴포넌트 이름은 한 단어(`Cart`, `Follow`, `Favorite`)로 짓습니다.
//!
//! ## 순환 참조
//!
//! 생성 중인 타입을 다시 요청하면 즉시 패닉합니다. 서비스 → 리포지토리 → 인프라
//! 방향의 단방향 의존성만 허용합니다.

use std::any::{Any, TypeId};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use crate::utils::display_terminal::{
    print_boxed_title, print_cache_initialized, print_final_summary, print_step_complete,
    print_step_start, print_sub_task,
};

/// `#[service]` 매크로가 구현하는 비즈니스 서비스 인터페이스
#[async_trait]
pub trait Service: Send + Sync {
    fn name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// `#[repository]` 매크로가 구현하는 데이터 액세스 인터페이스
#[async_trait]
pub trait Repository: Send + Sync {
    fn name(&self) -> &str;

    /// 연결된 MongoDB 컬렉션 이름
    fn collection_name(&self) -> &str;

    async fn init(&self) -> Result<(), Box<dyn std::error::Error>>;
}

/// 서비스 등록 정보 (`inventory`로 수집)
pub struct ServiceRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

/// 리포지토리 등록 정보 (`inventory`로 수집)
pub struct RepositoryRegistration {
    pub name: &'static str,
    pub constructor: fn() -> Box<dyn Any + Send + Sync>,
}

inventory::collect!(ServiceRegistration);
inventory::collect!(RepositoryRegistration);

type Constructor = fn() -> Box<dyn Any + Send + Sync>;

static SERVICE_NAME_CACHE: Lazy<HashMap<String, Constructor>> = Lazy::new(|| {
    let cache: HashMap<String, Constructor> = inventory::iter::<ServiceRegistration>()
        .map(|registration| (clean_registration_name(registration.name), registration.constructor))
        .collect();

    print_cache_initialized("Service", cache.len());
    cache
});

static REPOSITORY_NAME_CACHE: Lazy<HashMap<String, Constructor>> = Lazy::new(|| {
    let cache: HashMap<String, Constructor> = inventory::iter::<RepositoryRegistration>()
        .map(|registration| (clean_registration_name(registration.name), registration.constructor))
        .collect();

    print_cache_initialized("Repository", cache.len());
    cache
});

/// 등록 이름에서 `_service` / `_repository` 접미사 제거
fn clean_registration_name(name: &str) -> String {
    name.strip_suffix("_service")
        .or_else(|| name.strip_suffix("_repository"))
        .unwrap_or(name)
        .to_string()
}

/// `crate::a::b::RecipeService` → `RecipeService`
fn short_type_name(type_name: &str) -> &str {
    type_name.rsplit("::").next().unwrap_or(type_name)
}

/// 전역 싱글톤 컨테이너
pub struct ServiceLocator {
    instances: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
    initializing: RwLock<HashSet<TypeId>>,
}

impl ServiceLocator {
    fn new() -> Self {
        Self {
            instances: RwLock::new(HashMap::new()),
            initializing: RwLock::new(HashSet::new()),
        }
    }

    /// 타입 `T`의 싱글톤을 반환합니다. 없으면 등록 정보로 생성합니다.
    ///
    /// # Panics
    ///
    /// * 순환 참조가 감지된 경우
    /// * 등록되지 않은 타입을 요청한 경우
    pub fn get<T: 'static + Send + Sync>() -> Arc<T> {
        let type_id = TypeId::of::<T>();
        let type_name = std::any::type_name::<T>();

        if let Some(instance) = Self::cached::<T>(type_id) {
            return instance;
        }

        {
            let mut initializing = LOCATOR
                .initializing
                .write()
                .unwrap_or_else(PoisonError::into_inner);
            if !initializing.insert(type_id) {
                log::error!("❌ 순환 참조 감지: {}", type_name);
                panic!("Circular dependency detected: {} is already being initialized", type_name);
            }
        }

        let result = std::panic::catch_unwind(|| Self::construct::<T>(type_name));

        LOCATOR
            .initializing
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&type_id);

        match result {
            Ok(instance) => {
                LOCATOR
                    .instances
                    .write()
                    .unwrap_or_else(PoisonError::into_inner)
                    .entry(type_id)
                    .or_insert_with(|| instance.clone() as Arc<dyn Any + Send + Sync>);
                Self::cached::<T>(type_id).unwrap_or(instance)
            }
            Err(e) => {
                log::error!("인스턴스 생성 실패 {}: {:?}", type_name, e);
                panic!("Failed to create instance for {}", type_name);
            }
        }
    }

    fn cached<T: 'static + Send + Sync>(type_id: TypeId) -> Option<Arc<T>> {
        let instances = LOCATOR
            .instances
            .read()
            .unwrap_or_else(PoisonError::into_inner);

        instances
            .get(&type_id)
            .and_then(|instance| instance.clone().downcast::<T>().ok())
    }

    fn construct<T: 'static + Send + Sync>(type_name: &str) -> Arc<T> {
        let short_name = short_type_name(type_name);

        let (entity_name, registry) = if let Some(entity) = short_name.strip_suffix("Repository") {
            (entity.to_lowercase(), &*REPOSITORY_NAME_CACHE)
        } else if let Some(entity) = short_name.strip_suffix("Service") {
            (entity.to_lowercase(), &*SERVICE_NAME_CACHE)
        } else {
            panic!(
                "Service not found: {}. Register it with #[service] / #[repository] or ServiceLocator::set()",
                type_name
            );
        };

        let constructor = registry
            .get(&entity_name)
            .unwrap_or_else(|| panic!("No component registered for: {}", entity_name));

        match constructor().downcast::<Arc<T>>() {
            Ok(instance) => (*instance).clone(),
            Err(_) => panic!("Type mismatch for component: {}", entity_name),
        }
    }

    /// 외부 인프라 컴포넌트(Database, RedisClient)를 직접 등록합니다.
    pub fn set<T: 'static + Send + Sync>(instance: Arc<T>) {
        let type_id = TypeId::of::<T>();

        log::info!("📦 Registering: {}", short_type_name(std::any::type_name::<T>()));

        LOCATOR
            .instances
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(type_id, instance as Arc<dyn Any + Send + Sync>);
    }

    /// 수집된 모든 리포지토리와 서비스를 미리 생성합니다.
    ///
    /// 리포지토리를 먼저 만들고 서비스를 만듭니다. 첫 요청에서 생성 비용을
    /// 치르지 않도록 기동 시점에 한 번 호출합니다.
    pub async fn initialize_all() -> Result<(), Box<dyn std::error::Error>> {
        print_boxed_title("🔄 INITIALIZING SERVICE REGISTRY");

        let repo_registrations: Vec<_> = inventory::iter::<RepositoryRegistration>().collect();
        let repo_count = repo_registrations.len();

        if repo_count > 0 {
            print_step_start(1, "Creating Repository instances");

            for registration in repo_registrations {
                print_sub_task(registration.name, "Creating...");
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(1, "Repository instances created", repo_count);
        }

        let service_registrations: Vec<_> = inventory::iter::<ServiceRegistration>().collect();
        let service_count = service_registrations.len();

        if service_count > 0 {
            print_step_start(2, "Creating Service instances");

            for registration in service_registrations {
                print_sub_task(registration.name, "Creating...");
                let _instance = (registration.constructor)();
                print_sub_task(registration.name, "✓ Created");
            }

            print_step_complete(2, "Service instances created", service_count);
        }

        print_final_summary(repo_count, service_count);

        Ok(())
    }
}

static LOCATOR: Lazy<ServiceLocator> = Lazy::new(ServiceLocator::new);
