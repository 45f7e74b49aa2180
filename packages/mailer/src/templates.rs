// ABOUTME: HTML email templates
// ABOUTME: Welcome and password reset bodies with their subjects

pub const WELCOME_SUBJECT: &str = "Welcome to RecordHub!";
pub const PASSWORD_RESET_SUBJECT: &str = "Reset Your Password - RecordHub";

/// Welcome email sent after registration
pub fn welcome(name: &str, dashboard_url: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; padding: 0; background-color: #f4f4f4;">
  <div style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <div style="background-color: #ffffff; border-radius: 12px; padding: 40px; box-shadow: 0 2px 8px rgba(0,0,0,0.1);">
      <div style="text-align: center; margin-bottom: 30px;">
        <h1 style="color: #000000; margin: 0; font-size: 28px;">Welcome to RecordHub!</h1>
      </div>
      <p style="color: #333333; font-size: 16px; line-height: 1.6;">Hi {name},</p>
      <p style="color: #333333; font-size: 16px; line-height: 1.6;">
        Thank you for joining RecordHub! We're excited to have you on board.
      </p>
      <p style="color: #333333; font-size: 16px; line-height: 1.6;">With RecordHub, you can:</p>
      <ul style="color: #333333; font-size: 16px; line-height: 1.8;">
        <li>Create and manage records efficiently</li>
        <li>Organize with custom categories</li>
        <li>Track due dates and priorities</li>
        <li>Search and filter your data</li>
      </ul>
      <div style="text-align: center; margin-top: 30px;">
        <a href="{dashboard_url}"
           style="display: inline-block; background-color: #000000; color: #ffffff; padding: 14px 32px; text-decoration: none; border-radius: 8px; font-weight: 600;">
          Go to Dashboard
        </a>
      </div>
      <p style="color: #666666; font-size: 14px; margin-top: 40px; text-align: center;">
        If you have any questions, feel free to reach out.
      </p>
    </div>
    <p style="color: #999999; font-size: 12px; text-align: center; margin-top: 20px;">
      RecordHub. All rights reserved.
    </p>
  </div>
</body>
</html>"#
    )
}

/// Password reset email with a time-limited link
pub fn password_reset(name: &str, reset_link: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html>
<head>
  <meta charset="utf-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
</head>
<body style="font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; margin: 0; padding: 0; background-color: #f4f4f4;">
  <div style="max-width: 600px; margin: 0 auto; padding: 40px 20px;">
    <div style="background-color: #ffffff; border-radius: 12px; padding: 40px; box-shadow: 0 2px 8px rgba(0,0,0,0.1);">
      <div style="text-align: center; margin-bottom: 30px;">
        <h1 style="color: #000000; margin: 0; font-size: 28px;">Reset Your Password</h1>
      </div>
      <p style="color: #333333; font-size: 16px; line-height: 1.6;">Hi {name},</p>
      <p style="color: #333333; font-size: 16px; line-height: 1.6;">
        We received a request to reset your password. Click the button below to create a new password.
      </p>
      <div style="text-align: center; margin: 30px 0;">
        <a href="{reset_link}"
           style="display: inline-block; background-color: #000000; color: #ffffff; padding: 14px 32px; text-decoration: none; border-radius: 8px; font-weight: 600;">
          Reset Password
        </a>
      </div>
      <p style="color: #666666; font-size: 14px; line-height: 1.6;">
        This link will expire in 1 hour. If you didn't request a password reset, you can safely ignore this email.
      </p>
      <p style="color: #999999; font-size: 12px; margin-top: 30px;">
        If the button doesn't work, copy and paste this link into your browser:<br>
        <a href="{reset_link}" style="color: #666666; word-break: break-all;">{reset_link}</a>
      </p>
    </div>
    <p style="color: #999999; font-size: 12px; text-align: center; margin-top: 20px;">
      RecordHub. All rights reserved.
    </p>
  </div>
</body>
</html>"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_reset_embeds_name_and_link() {
        let html = password_reset("Alice", "https://example.com/auth/reset-password?token=abc");

        assert!(html.contains("Hi Alice,"));
        assert!(html.contains("https://example.com/auth/reset-password?token=abc"));
        assert!(html.contains("expire in 1 hour"));
    }

    #[test]
    fn test_welcome_embeds_dashboard_url() {
        let html = welcome("Alice", "https://example.com/dashboard");

        assert!(html.contains("Hi Alice,"));
        assert!(html.contains("https://example.com/dashboard"));
    }
}
