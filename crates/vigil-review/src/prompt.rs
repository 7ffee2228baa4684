//! Fixed instruction and prompt template for the review model.
//!
//! The bot reviews in Korean for a Korean-speaking team; both strings are
//! part of the product behavior, not localization.

/// System instruction establishing the reviewer persona and output format.
pub const SYSTEM_INSTRUCTION: &str = "당신은 친절하고 유능한 시니어 보안 엔지니어입니다. \
후배 개발자가 이해하기 쉽도록 아래의 [Checkov 스캔 결과]를 분석해 리뷰를 작성합니다. \
답변 형식은 반드시 Markdown을 사용하고, 한국어로 작성해야 합니다.";

/// Build the user prompt embedding the findings summary JSON.
///
/// The template fixes three formatting rules: overall summary first, a
/// problem/risk/fix breakdown per finding, and fix code in a fenced
/// `terraform` block.
///
/// # Examples
///
/// ```
/// use vigil_review::prompt::build_review_prompt;
///
/// let prompt = build_review_prompt("[]");
/// assert!(prompt.contains("[Checkov 스캔 결과]"));
/// assert!(prompt.contains("```terraform"));
/// ```
pub fn build_review_prompt(summary_json: &str) -> String {
    format!(
        "이 IaC 코드에 대한 친절한 보안 검토를 요청합니다.\n\
         \n\
         다음 규칙을 반드시 지켜주세요:\n\
         1. 전체적인 요약으로 시작해주세요.\n\
         2. 각 취약점에 대해 '문제점', '위험성', '해결 방안(수정 코드 예시 포함)'을 명확히 구분하여 설명해주세요.\n\
         3. 수정 코드는 정확한 Terraform 형식의 코드 블록(```terraform ... ```)으로 제시해야 합니다.\n\
         \n\
         [Checkov 스캔 결과]\n\
         {summary_json}\n"
    )
}
