use crate::counter::Session;
use crate::digits::{lcd_digits, to_persian_digits};
use crate::models::PRESETS;
use crate::progress::{RingColors, RingGeometry, render_ring};
use crate::quote::QuoteDisplay;
use crate::themes::{self, Theme};
use std::fmt::Write;

const PRESET_LABELS: [&str; 5] = ["تسبیحات", "تسبیح", "معصومین", "نذر", "کبیر"];

pub fn render_index(session: &Session, quote: &QuoteDisplay) -> String {
    let theme = session.theme.theme();
    INDEX_HTML
        .replace("{{THEME_VARS}}", &theme_vars(theme))
        .replace("{{META_COLOR}}", theme.meta_color)
        .replace("{{TARGET_SELECTOR}}", &target_selector(session))
        .replace("{{LCD}}", &lcd_digits(session.count))
        .replace("{{LCD_TARGET}}", &session.target.to_string())
        .replace("{{VIBRATE}}", if session.vibration_enabled { "true" } else { "false" })
        .replace("{{RING}}", &ring(session, theme))
        .replace("{{MODALS}}", &modals(session, theme))
        .replace("{{QUOTE_EMPTY}}", if quote.quote.is_none() { "true" } else { "false" })
        .replace("{{QUOTE}}", &quote_body(quote))
}

fn theme_vars(theme: &Theme) -> String {
    format!(
        "--bg: {}; --page-text: {}; --text-main: {}; --text-sec: {}; --text-header: {}; \
         --device-body: {}; --device-border: {}; --screen: {}; --screen-text: {}; \
         --button: {}; --button-border: {}; --accent: {}; --accent-hover: {}; \
         --panel: {}; --border: {}; --glow: {};",
        theme.background,
        theme.page_text,
        theme.text_main,
        theme.text_secondary,
        theme.text_header,
        theme.device_body.css("180deg"),
        theme.device_border,
        theme.device_screen,
        theme.device_screen_text,
        theme.device_button.css("135deg"),
        theme.device_button_border,
        theme.accent,
        theme.accent_hover,
        theme.panel,
        theme.border,
        theme.glow,
    )
}

fn target_selector(session: &Session) -> String {
    if session.view.custom_target {
        return format!(
            r#"<form method="post" action="/action" class="inline">
          <input type="hidden" name="action" value="manual_target" />
          <input class="manual" type="number" name="value" value="{}" min="1" dir="ltr" onchange="this.form.submit()" autofocus />
        </form>
        <form method="post" action="/action" class="inline">
          <input type="hidden" name="action" value="clear_custom_target" />
          <button class="clear" type="submit" aria-label="لغو">×</button>
        </form>"#,
            session.target
        );
    }

    let mut options = String::new();
    for (preset, label) in PRESETS.iter().zip(PRESET_LABELS) {
        let selected = if session.target.get() == *preset { " selected" } else { "" };
        let _ = write!(
            options,
            r#"<option value="{preset}"{selected}>{} ({label})</option>"#,
            to_persian_digits(preset)
        );
    }
    options.push_str(r#"<option value="custom">دستی...</option>"#);

    format!(
        r#"<form method="post" action="/action" class="inline">
          <input type="hidden" name="action" value="select_target" />
          <select name="value" onchange="this.form.submit()" dir="rtl">{options}</select>
        </form>"#
    )
}

fn ring(session: &Session, theme: &Theme) -> String {
    render_ring(
        session.count,
        session.target,
        RingGeometry::default(),
        RingColors {
            progress: theme.accent,
            track: theme.device_border,
            text: theme.text_main,
        },
    )
}

fn quote_body(quote: &QuoteDisplay) -> String {
    if quote.loading || quote.quote.is_none() {
        return r#"<div class="skeleton"><div></div><div class="short"></div></div>"#.to_string();
    }

    let mut body = String::new();
    if let Some(quote) = &quote.quote {
        let _ = write!(body, r#"<p class="quote-text">«{}»</p>"#, escape_html(&quote.text));
        if let Some(source) = &quote.source {
            let _ = write!(body, r#"<p class="quote-source">— {}</p>"#, escape_html(source));
        }
    }
    body
}

fn modals(session: &Session, theme: &Theme) -> String {
    let mut out = String::new();
    if session.view.settings_open {
        out.push_str(&settings_modal(session, theme));
    }
    if session.view.reset_prompt {
        out.push_str(&reset_modal(session));
    }
    if session.view.history_open {
        out.push_str(&history_modal(session));
    }
    out
}

fn action_button(action: &str, extra: &str, class: &str, label: &str) -> String {
    format!(
        r#"<form method="post" action="/action">
          <input type="hidden" name="action" value="{action}" />{extra}
          <button class="{class}" type="submit">{label}</button>
        </form>"#
    )
}

fn settings_modal(session: &Session, current: &Theme) -> String {
    let vibration_state = if session.vibration_enabled { "on" } else { "off" };
    let mut choices = String::new();
    for theme in themes::all() {
        let active = if theme.id == current.id { " active" } else { "" };
        let _ = write!(
            choices,
            r#"<form method="post" action="/action">
          <input type="hidden" name="action" value="select_theme" />
          <input type="hidden" name="value" value="{id}" />
          <button class="theme-choice{active}" type="submit">
            <span class="swatch" style="background: {swatch}"></span>
            <span>{name}</span>
          </button>
        </form>"#,
            id = theme.id,
            swatch = theme.device_body.css("135deg"),
            name = theme.name,
        );
    }

    format!(
        r#"<div class="overlay">
      <div class="modal">
        <div class="modal-head">
          <h3>تنظیمات</h3>
          {close}
        </div>
        <h4>تنظیمات عمومی</h4>
        {vibration}
        <h4>طرح و رنگ دستگاه</h4>
        <div class="theme-list">{choices}</div>
        {done}
      </div>
    </div>"#,
        close = action_button("close_settings", "", "icon", "×"),
        vibration = action_button(
            "toggle_vibration",
            "",
            &format!("toggle {vibration_state}"),
            r#"<span>لرزش (ویبره) هنگام شمارش</span><span class="switch"><span></span></span>"#,
        ),
        done = action_button("close_settings", "", "primary", "تایید و بازگشت"),
    )
}

fn reset_modal(session: &Session) -> String {
    format!(
        r#"<div class="overlay">
      <div class="modal center">
        <h3>پایان شمارش؟</h3>
        <p class="muted">آیا می‌خواهید {count} ذکر فرستاده شده را در تاریخچه ذخیره کنید؟</p>
        {archive}
        {discard}
        {cancel}
      </div>
    </div>"#,
        count = to_persian_digits(session.count),
        archive = action_button(
            "confirm_reset",
            r#"<input type="hidden" name="value" value="true" />"#,
            "primary",
            "بله، ذخیره کن و صفر شو",
        ),
        discard = action_button(
            "confirm_reset",
            r#"<input type="hidden" name="value" value="false" />"#,
            "danger",
            "خیر، فقط صفر شو (بدون ذخیره)",
        ),
        cancel = action_button("cancel_reset", "", "link", "انصراف"),
    )
}

fn history_modal(session: &Session) -> String {
    let mut items = String::new();
    if session.history.is_empty() {
        items.push_str(r#"<div class="muted empty">هنوز ذکری ثبت نشده است.</div>"#);
    }
    for item in &session.history {
        let target = item
            .target
            .map(|target| format!(" / {}", to_persian_digits(target)))
            .unwrap_or_default();
        let _ = write!(
            items,
            r#"<div class="history-item">
          <div>
            <div class="history-count">{count}{target} <span class="muted">ذکر</span></div>
            <div class="muted small">{date}</div>
          </div>
          <form method="post" action="/action">
            <input type="hidden" name="action" value="delete_history" />
            <input type="hidden" name="id" value="{id}" />
            <button class="delete" type="submit" aria-label="حذف">🗑</button>
          </form>
        </div>"#,
            count = to_persian_digits(item.count),
            date = escape_html(&to_persian_digits(&item.date)),
            id = escape_html(&item.id),
        );
    }

    format!(
        r#"<div class="overlay">
      <div class="modal tall">
        <div class="modal-head">
          <h2>تاریخچه ذکرها</h2>
          {close}
        </div>
        <div class="history-list">{items}</div>
      </div>
    </div>"#,
        close = action_button("close_history", "", "icon", "×"),
    )
}

pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="fa" dir="rtl">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <meta name="theme-color" content="{{META_COLOR}}" />
  <title>ذکر شمار</title>
  <link rel="stylesheet" href="https://cdn.jsdelivr.net/gh/rastikerdar/vazirmatn@v33.003/Vazirmatn-font-face.css" />
  <style>
    :root { {{THEME_VARS}} }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: var(--bg);
      color: var(--page-text);
      font-family: "Vazirmatn", "Tahoma", sans-serif;
      display: flex;
      flex-direction: column;
      align-items: center;
      padding: 24px 16px 48px;
      user-select: none;
      transition: background 500ms ease;
    }

    form {
      margin: 0;
    }

    button {
      font-family: inherit;
      cursor: pointer;
    }

    header {
      width: min(420px, 100%);
      display: flex;
      justify-content: space-between;
      align-items: center;
      margin-bottom: 16px;
    }

    header h1 {
      margin: 0;
      font-size: 1.3rem;
      color: var(--text-header);
    }

    .icon {
      background: transparent;
      border: none;
      color: var(--text-header);
      font-size: 1.4rem;
      padding: 6px 10px;
      border-radius: 999px;
    }

    .target {
      width: min(280px, 100%);
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 8px;
      background: var(--panel);
      border: 1px solid var(--border);
      border-radius: 999px;
      padding: 8px 14px;
      margin-bottom: 24px;
      box-shadow: 0 6px 14px rgba(0, 0, 0, 0.12);
    }

    .target .label {
      color: var(--text-sec);
      font-size: 0.8rem;
    }

    .inline {
      display: inline-flex;
    }

    .target select,
    .target .manual {
      background: transparent;
      border: none;
      outline: none;
      color: var(--text-main);
      font-weight: 700;
      font-family: inherit;
    }

    .target .manual {
      width: 80px;
      text-align: center;
      border-bottom: 1px solid var(--accent);
      font-size: 1.1rem;
    }

    .target .clear {
      background: none;
      border: none;
      color: #f87171;
    }

    .device {
      position: relative;
      width: 300px;
      height: 380px;
      border-radius: 50px;
      background: var(--device-body);
      border: 1px solid var(--device-border);
      border-bottom-width: 8px;
      border-right-width: 4px;
      box-shadow: 0 24px 40px rgba(0, 0, 0, 0.3);
    }

    .screen {
      position: absolute;
      top: 50px;
      left: 35px;
      right: 35px;
      height: 100px;
      border-radius: 10px;
      padding: 8px;
      background: rgba(0, 0, 0, 0.2);
    }

    .glass {
      position: relative;
      height: 100%;
      border-radius: 8px;
      background: var(--screen);
      color: var(--screen-text);
      display: flex;
      align-items: center;
      justify-content: center;
      overflow: hidden;
      box-shadow: inset 0 2px 6px rgba(0, 0, 0, 0.4);
    }

    .glass::after {
      content: "";
      position: absolute;
      inset: 0;
      background: var(--glow);
      mix-blend-mode: hard-light;
      animation: flicker 4s infinite;
      pointer-events: none;
    }

    .digits {
      font-family: monospace;
      font-size: 3.4rem;
      font-weight: 700;
      letter-spacing: 0.1em;
    }

    .lcd-target {
      position: absolute;
      bottom: 4px;
      right: 8px;
      font-size: 0.7rem;
      opacity: 0.6;
    }

    .small-button {
      position: absolute;
      top: 185px;
      width: 32px;
      height: 32px;
      border-radius: 50%;
      border: 1px solid rgba(0, 0, 0, 0.3);
      box-shadow: 0 4px 8px rgba(0, 0, 0, 0.3);
    }

    .small-button.reset {
      left: 45px;
      background: linear-gradient(135deg, #e7e5e4, #a8a29e);
    }

    .small-button.settings {
      right: 45px;
      background: linear-gradient(135deg, #fde047, #ca8a04);
    }

    .small-label {
      position: absolute;
      top: 160px;
      font-size: 0.65rem;
      font-weight: 700;
      color: rgba(255, 255, 255, 0.5);
    }

    .small-label.reset {
      left: 42px;
    }

    .small-label.settings {
      right: 36px;
    }

    .main-button {
      position: absolute;
      bottom: 40px;
      left: calc(50% - 72px);
      width: 144px;
      height: 144px;
      border-radius: 50%;
      background: var(--button);
      border: 4px solid var(--button-border);
      box-shadow: 0 10px 20px rgba(0, 0, 0, 0.4), inset 0 2px 5px rgba(255, 255, 255, 0.7);
      transition: transform 100ms ease;
    }

    .main-button:active {
      transform: scale(0.98);
      box-shadow: inset 0 5px 10px rgba(0, 0, 0, 0.6);
    }

    .hint {
      margin-top: 28px;
      color: var(--text-sec);
      font-size: 0.85rem;
      opacity: 0.6;
    }

    .ring {
      position: relative;
      margin-top: 16px;
    }

    .ring-arc {
      transition: stroke-dashoffset 500ms ease-out;
    }

    .ring-label {
      position: absolute;
      inset: 0;
      display: flex;
      flex-direction: column;
      align-items: center;
      justify-content: center;
    }

    .ring-count {
      font-size: 3.2rem;
      font-weight: 700;
    }

    .ring-target {
      font-size: 0.85rem;
      opacity: 0.8;
    }

    .quote {
      width: min(420px, 100%);
      margin-top: 24px;
      background: rgba(255, 255, 255, 0.85);
      color: #334155;
      border: 1px solid #d1fae5;
      border-radius: 18px;
      padding: 20px;
    }

    .quote h3 {
      margin: 0 0 12px;
      color: #065f46;
      font-size: 1rem;
    }

    .quote-text {
      margin: 0 0 8px;
      font-size: 1.05rem;
      line-height: 1.8;
    }

    .quote-source {
      margin: 0;
      text-align: left;
      color: #059669;
      font-size: 0.85rem;
    }

    .quote .refresh {
      margin-top: 12px;
      background: none;
      border: none;
      color: #10b981;
      font-size: 0.75rem;
      text-decoration: underline;
    }

    .skeleton div {
      height: 8px;
      width: 75%;
      margin-bottom: 10px;
      border-radius: 4px;
      background: #d1fae5;
      animation: pulse 1.2s infinite;
    }

    .skeleton .short {
      width: 50%;
    }

    .overlay {
      position: fixed;
      inset: 0;
      background: rgba(0, 0, 0, 0.6);
      display: flex;
      align-items: center;
      justify-content: center;
      padding: 16px;
      z-index: 60;
    }

    .modal {
      width: min(380px, 100%);
      background: var(--panel);
      color: var(--page-text);
      border: 1px solid var(--border);
      border-radius: 18px;
      padding: 24px;
      display: grid;
      gap: 12px;
      box-shadow: 0 24px 48px rgba(0, 0, 0, 0.35);
    }

    .modal.center {
      text-align: center;
    }

    .modal.tall {
      max-height: 80vh;
      overflow-y: auto;
    }

    .modal h2,
    .modal h3 {
      margin: 0;
      color: var(--text-header);
    }

    .modal h4 {
      margin: 8px 0 0;
      color: var(--text-main);
      font-size: 0.9rem;
    }

    .modal-head {
      display: flex;
      justify-content: space-between;
      align-items: center;
    }

    .muted {
      color: var(--text-sec);
    }

    .small {
      font-size: 0.75rem;
    }

    .primary,
    .danger,
    .link,
    .toggle,
    .theme-choice {
      width: 100%;
      border-radius: 12px;
      padding: 12px;
      font-weight: 700;
    }

    .primary {
      background: var(--accent);
      color: white;
      border: none;
    }

    .primary:hover {
      background: var(--accent-hover);
    }

    .danger {
      background: rgba(239, 68, 68, 0.1);
      color: #ef4444;
      border: none;
    }

    .link {
      background: none;
      border: none;
      color: var(--text-sec);
      font-weight: 400;
    }

    .toggle,
    .theme-choice {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 12px;
      background: transparent;
      border: 1px solid var(--border);
      color: var(--text-sec);
    }

    .theme-choice {
      justify-content: flex-start;
      border-color: transparent;
    }

    .theme-choice.active {
      border-color: currentColor;
      color: var(--text-header);
      background: rgba(0, 0, 0, 0.05);
    }

    .theme-list {
      display: grid;
      gap: 8px;
    }

    .swatch {
      width: 32px;
      height: 32px;
      border-radius: 6px;
    }

    .switch {
      position: relative;
      width: 48px;
      height: 24px;
      border-radius: 999px;
      background: #cbd5e1;
    }

    .toggle.on .switch {
      background: var(--accent);
    }

    .switch span {
      position: absolute;
      top: 4px;
      right: 4px;
      width: 16px;
      height: 16px;
      border-radius: 50%;
      background: white;
    }

    .toggle.on .switch span {
      right: auto;
      left: 4px;
    }

    .history-item {
      display: flex;
      justify-content: space-between;
      align-items: center;
      padding: 12px;
      border: 1px solid var(--border);
      border-radius: 12px;
      margin-bottom: 8px;
    }

    .history-count {
      font-size: 1.1rem;
      font-weight: 700;
      color: var(--text-main);
    }

    .delete {
      background: none;
      border: none;
      color: #f87171;
      font-size: 1.1rem;
    }

    .empty {
      text-align: center;
      padding: 32px 0;
    }

    @keyframes flicker {
      0%, 100% { opacity: 1; }
      50% { opacity: 0.85; }
    }

    @keyframes pulse {
      0%, 100% { opacity: 1; }
      50% { opacity: 0.4; }
    }
  </style>
</head>
<body>
  <header>
    <h1>ذکر شمار</h1>
    <form method="post" action="/action">
      <input type="hidden" name="action" value="open_history" />
      <button class="icon" type="submit" title="تاریخچه">🕓</button>
    </form>
  </header>

  <div class="target">
    <span class="label">هدف:</span>
    {{TARGET_SELECTOR}}
  </div>

  <div class="device">
    <div class="screen">
      <div class="glass">
        <span class="digits" id="digits">{{LCD}}</span>
        <span class="lcd-target">TARGET {{LCD_TARGET}}</span>
      </div>
    </div>

    <span class="small-label reset">ریست</span>
    <span class="small-label settings">تنظیمات</span>

    <form method="post" action="/action">
      <input type="hidden" name="action" value="request_reset" />
      <button class="small-button reset" type="submit" aria-label="ریست"></button>
    </form>
    <form method="post" action="/action">
      <input type="hidden" name="action" value="open_settings" />
      <button class="small-button settings" type="submit" aria-label="تنظیمات"></button>
    </form>

    <form method="post" action="/action" id="increment-form">
      <input type="hidden" name="action" value="increment" />
      <button class="main-button" type="submit" data-vibrate="{{VIBRATE}}" id="increment" aria-label="شمارش"></button>
    </form>
  </div>

  <p class="hint">برای شمارش دکمه بزرگ را فشار دهید</p>

  {{RING}}

  <section class="quote">
    <h3>نکته معنوی (هوش مصنوعی)</h3>
    <div id="quote-body" data-empty="{{QUOTE_EMPTY}}">{{QUOTE}}</div>
    <form method="post" action="/quote/refresh" id="quote-form">
      <button class="refresh" type="submit" id="quote-refresh">دریافت نکته جدید</button>
    </form>
  </section>

  {{MODALS}}

  <script>
    const quoteBody = document.getElementById('quote-body');
    const quoteButton = document.getElementById('quote-refresh');
    const incrementForm = document.getElementById('increment-form');
    const incrementButton = document.getElementById('increment');
    const digitsEl = document.getElementById('digits');
    const ringCount = document.querySelector('.ring-count');
    const ringArc = document.querySelector('.ring-arc');
    const click = new Audio('https://assets.mixkit.co/sfx/preview/mixkit-mechanical-switch-click-1144.mp3');
    click.volume = 0.3;

    const escapeText = (value) => {
      const span = document.createElement('span');
      span.textContent = value;
      return span.innerHTML;
    };

    const showQuote = (data) => {
      if (!data.quote) {
        return;
      }
      let html = `<p class="quote-text">«${escapeText(data.quote.text)}»</p>`;
      if (data.quote.source) {
        html += `<p class="quote-source">— ${escapeText(data.quote.source)}</p>`;
      }
      quoteBody.innerHTML = html;
    };

    const refreshQuote = async () => {
      quoteButton.disabled = true;
      quoteBody.innerHTML = '<div class="skeleton"><div></div><div class="short"></div></div>';
      try {
        const res = await fetch('/api/quote/refresh', { method: 'POST' });
        if (res.ok) {
          showQuote(await res.json());
        }
      } catch (err) {
        // the server always answers with a quote; a dropped connection just leaves the skeleton
      } finally {
        quoteButton.disabled = false;
      }
    };

    document.getElementById('quote-form').addEventListener('submit', (event) => {
      event.preventDefault();
      refreshQuote();
    });

    const persianDigits = (value) => String(value).replace(/[0-9]/g, (d) => '۰۱۲۳۴۵۶۷۸۹'[Number(d)]);

    const showCount = (view) => {
      digitsEl.textContent = persianDigits(String(view.count).padStart(4, '0'));
      if (ringCount) {
        ringCount.textContent = persianDigits(view.count);
      }
      if (ringArc) {
        const circumference = Number(ringArc.dataset.circumference);
        ringArc.style.strokeDashoffset = (circumference * (1 - view.progress)).toFixed(2);
      }
    };

    incrementForm.addEventListener('submit', async (event) => {
      event.preventDefault();
      if (incrementButton.dataset.vibrate === 'true' && navigator.vibrate) {
        navigator.vibrate(15);
      }
      try {
        click.currentTime = 0;
        click.play().catch(() => {});
      } catch (err) {}
      try {
        const res = await fetch('/api/action', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ action: 'increment' })
        });
        if (!res.ok) {
          throw new Error(await res.text());
        }
        showCount(await res.json());
      } catch (err) {
        incrementForm.submit();
      }
    });

    if (quoteBody.dataset.empty === 'true') {
      refreshQuote();
    }
  </script>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counter::Action;
    use crate::quote::Quote;
    use crate::themes::ThemeId;
    use chrono::Local;

    #[test]
    fn page_shows_lcd_digits_and_theme() {
        let session = Session {
            count: 42,
            theme: ThemeId::Emerald,
            ..Session::default()
        };
        let html = render_index(&session, &QuoteDisplay::default());
        assert!(html.contains("۰۰۴۲"));
        assert!(html.contains("#c8cdba"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn modals_follow_view_flags() {
        let closed = render_index(&Session::default(), &QuoteDisplay::default());
        assert!(!closed.contains("پایان شمارش؟"));

        let session = Session {
            count: 3,
            ..Session::default()
        }
        .apply(Action::RequestReset, Local::now())
        .apply(Action::OpenHistory, Local::now());
        let open = render_index(&session, &QuoteDisplay::default());
        assert!(open.contains("پایان شمارش؟"));
        assert!(open.contains("هنوز ذکری ثبت نشده است."));
    }

    #[test]
    fn custom_mode_renders_manual_input() {
        let session = Session::default().apply(Action::EnterCustomTarget, Local::now());
        let html = render_index(&session, &QuoteDisplay::default());
        assert!(html.contains(r#"value="manual_target""#));
        assert!(!html.contains("<select"));
    }

    #[test]
    fn settled_quote_is_not_fetched_again_on_reload() {
        let session = Session::default().apply(Action::Increment, Local::now());
        let settled = QuoteDisplay {
            quote: Some(Quote::fallback()),
            loading: false,
        };
        let html = render_index(&session, &settled);
        assert!(html.contains(r#"data-empty="false""#));
        assert!(html.contains("if (quoteBody.dataset.empty === 'true')"));
        assert!(!html.contains("\n    refreshQuote();\n"));

        let fresh = render_index(&session, &QuoteDisplay::default());
        assert!(fresh.contains(r#"data-empty="true""#));
    }

    #[test]
    fn increment_posts_without_reloading() {
        let html = render_index(&Session::default(), &QuoteDisplay::default());
        assert!(html.contains("fetch('/api/action'"));
        assert!(html.contains("data-circumference="));
    }

    #[test]
    fn quote_text_is_escaped() {
        let quote = QuoteDisplay {
            quote: Some(Quote {
                text: "<script>x</script>".into(),
                source: None,
            }),
            loading: false,
        };
        let html = render_index(&Session::default(), &quote);
        assert!(html.contains("&lt;script&gt;x&lt;/script&gt;"));
    }
}
