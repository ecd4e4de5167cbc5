//! # Domain Layer Module
//!
//! ```text
//! Domain Layer (이 모듈)
//! ├── entities  - MongoDB 문서와 대응하는 엔티티
//! ├── dto       - 요청/응답 구조와 입력 검증
//! └── models    - 인증 정보, 짧은 링크, 장보기 목록, 이미지 데이터
//!      │
//!      ▼
//! Application Layer (services)
//!      │
//!      ▼
//! Infrastructure Layer (repositories, db, caching)
//! ```
//!
//! 도메인 계층은 저장소에 접근하지 않습니다. 재료/태그 존재 확인처럼 저장소가
//! 필요한 규칙은 서비스 계층에서 처리합니다.

pub mod entities;
pub mod dto;
pub mod models;
