use crate::core::context::AppContext;
use crate::utils::html::esc;
use std::fmt::Write as _;

struct Toggle {
    label: &'static str,
    description: &'static str,
    checked: bool,
}

const NOTIFICATIONS: [Toggle; 3] = [
    Toggle {
        label: "Email Alerts",
        description: "Receive email when reputation score changes significantly",
        checked: true,
    },
    Toggle {
        label: "Risk Warnings",
        description: "Get notified when risk level increases",
        checked: true,
    },
    Toggle {
        label: "Weekly Reports",
        description: "Receive a weekly summary of business metrics",
        checked: false,
    },
];

const PREFERENCES: [Toggle; 2] = [
    Toggle {
        label: "Compact View",
        description: "Reduce spacing for denser information display",
        checked: false,
    },
    Toggle {
        label: "Auto-refresh Data",
        description: "Automatically refresh analytics data every 30 minutes",
        checked: true,
    },
];

fn toggles_card(out: &mut String, icon: &str, title: &str, toggles: &[Toggle]) {
    let _ = write!(
        out,
        r#"
  <div class="card section">
    <h3 class="section-heading"><span>{}</span> {}</h3>"#,
        icon, title
    );
    for toggle in toggles {
        let _ = write!(
            out,
            r#"
    <div class="settings-row">
      <div class="settings-info"><div class="settings-label">{}</div><div class="settings-desc">{}</div></div>
      <label class="toggle"><input type="checkbox"{} /><span class="toggle-slider"></span></label>
    </div>"#,
            toggle.label,
            toggle.description,
            if toggle.checked { " checked" } else { "" },
        );
    }
    out.push_str("\n  </div>");
}

pub fn render(ctx: &AppContext) -> String {
    let ui = &ctx.config().ui;
    let initial = ui.user_name.chars().next().map(String::from).unwrap_or_default();

    let mut out = format!(
        r#"<div class="page-enter">
  <div class="greeting-bar">
    <div class="greeting-text">
      <h1>Settings</h1>
      <p>Configure your {app} workspace</p>
    </div>
  </div>
  <div class="card section">
    <h3 class="section-heading"><span>👤</span> Profile</h3>
    <div class="profile-summary">
      <div class="profile-avatar">{initial}</div>
      <div>
        <div class="profile-name">{name}</div>
        <div class="profile-email">{email}</div>
      </div>
    </div>
    <div class="grid-2">
      <div class="form-group">
        <label class="form-label">Full Name</label>
        <input type="text" class="form-input" value="{name}" />
      </div>
      <div class="form-group">
        <label class="form-label">Email</label>
        <input type="email" class="form-input" value="{email}" />
      </div>
    </div>
    <button class="btn btn-primary">Save Changes</button>
  </div>"#,
        app = esc(&ui.app_name),
        initial = esc(&initial),
        name = esc(&ui.user_name),
        email = esc(&ui.user_email),
    );

    toggles_card(&mut out, "🔔", "Notifications", &NOTIFICATIONS);
    toggles_card(&mut out, "⚙️", "Preferences", &PREFERENCES);
    out.push_str("\n</div>\n");
    out
}
