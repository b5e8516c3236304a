//! 章节分割器
//!
//! 按行扫描原始文本，识别章节标题行，并按标题位置切分章节。
//!
//! 标题行（去掉行首空白后）满足以下任一形式：
//! - `第` + 数字（`0-9` 或 `零一二三四五六七八九十百千万`）+ `章|卷|回|节`，行内其余内容一并作为标题
//! - `Chapter` + 空白 + ASCII 数字，行内其余内容一并作为标题

use super::book::Chapter;

/// 序章（第一个标题之前的文本）使用的索引
pub const PREAMBLE_INDEX: i32 = -1;

/// 未识别到任何标题时的整本章节标题
pub const FALLBACK_TITLE: &str = "正文";

/// 序章标题
pub const PREAMBLE_TITLE: &str = "序章 / 简介";

const LATIN_MARKER: &str = "Chapter";

const BYTE_ORDER_MARK: char = '\u{feff}';

/// 标题行在原文中的字节区间 `[start, end)`
///
/// `start` 为行首（包含行首空白），`end` 为行尾（不含换行符）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HeadingSpan {
    start: usize,
    end: usize,
}

#[inline]
fn is_heading_numeral(ch: char) -> bool {
    matches!(
        ch,
        '0'..='9'
            | '零'
            | '一'
            | '二'
            | '三'
            | '四'
            | '五'
            | '六'
            | '七'
            | '八'
            | '九'
            | '十'
            | '百'
            | '千'
            | '万'
    )
}

#[inline]
fn is_section_marker(ch: char) -> bool {
    matches!(ch, '章' | '卷' | '回' | '节')
}

/// `第X章` 形式
fn is_numeral_heading(line: &str) -> bool {
    let Some(rest) = line.strip_prefix('第') else {
        return false;
    };

    let mut chars = rest.chars().peekable();
    let mut numerals = 0;
    while chars.next_if(|&ch| is_heading_numeral(ch)).is_some() {
        numerals += 1;
    }

    numerals > 0 && chars.next().is_some_and(is_section_marker)
}

/// `Chapter N` 形式（大小写敏感）
fn is_latin_heading(line: &str) -> bool {
    let Some(rest) = line.strip_prefix(LATIN_MARKER) else {
        return false;
    };

    let after_space = rest.trim_start();
    if after_space.len() == rest.len() {
        return false;
    }

    after_space.starts_with(|ch: char| ch.is_ascii_digit())
}

/// 字节序标记（U+FEFF）按空白处理
#[inline]
fn is_blank(ch: char) -> bool {
    ch.is_whitespace() || ch == BYTE_ORDER_MARK
}

#[inline]
fn trim_blank(s: &str) -> &str {
    s.trim_matches(is_blank)
}

fn is_heading_line(line: &str) -> bool {
    let line = line.trim_start_matches(is_blank);
    is_numeral_heading(line) || is_latin_heading(line)
}

/// 按行切分，返回每行（不含行终止符）的字节区间
///
/// 行终止符：`\n`、`\r\n`、单独的 `\r`、U+2028、U+2029
fn line_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut line_start = 0;
    let mut chars = text.char_indices().peekable();

    while let Some((pos, ch)) = chars.next() {
        match ch {
            '\n' | '\u{2028}' | '\u{2029}' => {
                spans.push((line_start, pos));
                line_start = pos + ch.len_utf8();
            }
            '\r' => {
                spans.push((line_start, pos));
                line_start = match chars.next_if(|&(_, next)| next == '\n') {
                    Some((lf, _)) => lf + 1,
                    None => pos + 1,
                };
            }
            _ => {}
        }
    }
    spans.push((line_start, text.len()));

    spans
}

/// 单趟扫描全文，按出现顺序收集所有标题行区间
fn scan_headings(text: &str) -> Vec<HeadingSpan> {
    line_spans(text)
        .into_iter()
        .filter(|&(start, end)| is_heading_line(&text[start..end]))
        .map(|(start, end)| HeadingSpan { start, end })
        .collect()
}

/// 将文本切分为章节
///
/// - 没有任何标题：返回一个标题为 [`FALLBACK_TITLE`] 的整本章节
/// - 第一个标题之前有非空文本：先输出索引为 [`PREAMBLE_INDEX`] 的序章
/// - 每个标题的正文为其标题行之后到下一个标题行之前的文本（去除首尾空白）
///
/// 任意输入都会得到至少一个章节。
pub fn segment_chapters(text: &str) -> Vec<Chapter> {
    let text = text.strip_prefix(BYTE_ORDER_MARK).unwrap_or(text);
    let headings = scan_headings(text);

    if headings.is_empty() {
        return vec![Chapter::new(0, FALLBACK_TITLE, trim_blank(text))];
    }

    let mut chapters = Vec::with_capacity(headings.len() + 1);

    let first = headings[0];
    if first.start > 0 {
        let preamble = trim_blank(&text[..first.start]);
        if !preamble.is_empty() {
            chapters.push(Chapter::new(PREAMBLE_INDEX, PREAMBLE_TITLE, preamble));
        }
    }

    for (i, heading) in headings.iter().enumerate() {
        let body_end = headings
            .get(i + 1)
            .map(|next| next.start)
            .unwrap_or(text.len());

        let title = trim_blank(&text[heading.start..heading.end]);
        let content = trim_blank(&text[heading.end..body_end]);

        chapters.push(Chapter::new(i as i32, title, content));
    }

    chapters
}
