//! 터미널 출력 포맷팅 유틸리티
//!
//! 기동 과정(레지스트리 초기화, 인덱스 준비, 서버 바인딩)을 박스와 단계 표시로 출력합니다.
//! 로그 레벨과 무관하게 항상 보이도록 표준 출력에 직접 씁니다.

const BOX_WIDTH: usize = 50;

/// 박스로 둘러싼 제목 출력
///
/// ```text
/// ╔══════════════════════════════════════════════════╗
/// ║             🍳 RECIPE SERVICE STARTING           ║
/// ╚══════════════════════════════════════════════════╝
/// ```
pub fn print_boxed_title(title: &str) {
    let border = "═".repeat(BOX_WIDTH);

    println!("╔{}╗", border);
    println!("║{:^width$}║", title, width = BOX_WIDTH - 1);
    println!("╚{}╝", border);
}

pub fn print_step_start(step: u8, description: &str) {
    println!("→ Step {}: {}", step, description);
}

pub fn print_step_complete(step: u8, description: &str, count: usize) {
    println!("✓ Step {}: {} ({} items)", step, description, count);
}

pub fn print_sub_task(name: &str, status: &str) {
    println!("   ├─ {}: {}", name, status);
}

pub fn print_cache_initialized(cache_type: &str, count: usize) {
    println!("   ├─ {} Cache: {} entries loaded", cache_type, count);
}

pub fn print_final_summary(repos: usize, services: usize) {
    println!();
    print_boxed_title("🎉 SERVICE REGISTRY INITIALIZED");
    println!("   📦 Repositories: {}", repos);
    println!("   🔧 Services: {}", services);
    println!("   🚀 Total Components: {}", repos + services);
    println!();
}

/// 인덱스 준비 결과 출력 (컬렉션 이름, 성공 여부)
pub fn print_index_summary(results: &[(&str, bool)]) {
    print_step_start(3, "Ensuring MongoDB indexes");

    for (collection, ok) in results {
        print_sub_task(collection, if *ok { "✓ Ready" } else { "✗ Failed" });
    }

    let ready = results.iter().filter(|(_, ok)| *ok).count();
    print_step_complete(3, "Indexes ready", ready);
}
