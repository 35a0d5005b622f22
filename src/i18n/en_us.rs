pub(super) const MESSAGES: &[(&str, &str)] = &[
    ("common.actions.save", "Save"),
    ("common.actions.cancel", "Cancel"),
    ("common.actions.delete", "Delete"),
    ("common.actions.yes", "Yes"),
    ("common.actions.no", "No"),
    ("common.error", "Error"),
    ("common.success", "Success"),
    ("common.warning", "Warning"),
    ("navigation.home", "Home"),
    ("navigation.organizations", "Organizations"),
    ("navigation.companies", "Companies"),
    ("navigation.branches", "Branches"),
    ("navigation.departments", "Departments"),
    ("navigation.divisions", "Divisions"),
    ("navigation.salesOrganizations", "Sales Organizations"),
    ("navigation.customers", "Customers"),
    ("navigation.users", "Users"),
    ("navigation.accessControls", "Access Controls"),
    ("navigation.roles", "Roles"),
    ("navigation.permissions", "Permissions"),
    ("navigation.superset", "Superset"),
    ("navigation.signOut", "Sign Out"),
    ("table.search", "Search"),
    ("table.empty", "No records found."),
];
