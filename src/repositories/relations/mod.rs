//! 사용자 관계 리포지토리
//!
//! 즐겨찾기, 장바구니, 구독은 모두 "쌍 하나당 문서 하나" 구조이며 쌍에 유니크
//! 인덱스를 둡니다. 추가 전 존재 여부를 확인하고, 동시에 들어온 중복 삽입은
//! 인덱스 위반(11000)을 `ConflictError`로 바꿔 보고합니다.

pub mod cart_repo;
pub mod favorite_repo;
pub mod follow_repo;

pub use cart_repo::CartRepository;
pub use favorite_repo::FavoriteRepository;
pub use follow_repo::FollowRepository;
