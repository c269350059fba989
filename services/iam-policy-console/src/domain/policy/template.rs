//! 默认策略模板

/// 新建策略时可载入的示例模板
pub const DEFAULT_POLICY_TEMPLATE: &str = r#"# Cedar Policy Template
# Define entities and their attributes

entity User {
  role: String,
  department: String,
  clearance_level: Integer,
  is_active: Boolean
}

entity Document {
  classification: String,
  department: String,
  owner: String,
  created_at: Long
}

entity Action {}

# Policy rules
policy "allow_read_document" {
  permit(
    principal in User::"alice",
    action in Action::"read",
    resource in Document::"public"
  );
}

policy "allow_admin_full_access" {
  permit(
    principal,
    action,
    resource
  ) when {
    principal.role == "admin" &&
    principal.is_active == true
  };
}

policy "allow_department_access" {
  permit(
    principal: User,
    action: Action,
    resource: Document
  ) when {
    principal.department == resource.department &&
    principal.clearance_level >= 3
  };
}"#;
