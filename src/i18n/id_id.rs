// Untranslated keys fall back to en-US.
pub(super) const MESSAGES: &[(&str, &str)] = &[
    ("common.actions.save", "Simpan"),
    ("common.actions.cancel", "Batal"),
    ("common.actions.delete", "Hapus"),
    ("common.actions.yes", "Ya"),
    ("common.actions.no", "Tidak"),
    ("common.error", "Galat"),
    ("common.success", "Berhasil"),
    ("navigation.home", "Beranda"),
    ("navigation.organizations", "Organisasi"),
    ("navigation.companies", "Perusahaan"),
    ("navigation.branches", "Cabang"),
    ("navigation.departments", "Departemen"),
    ("navigation.divisions", "Divisi"),
    ("navigation.salesOrganizations", "Organisasi Penjualan"),
    ("navigation.customers", "Pelanggan"),
    ("navigation.users", "Pengguna"),
    ("navigation.accessControls", "Kontrol Akses"),
    ("navigation.roles", "Peran"),
    ("navigation.permissions", "Izin"),
    ("navigation.signOut", "Keluar"),
    ("table.search", "Cari"),
    ("table.empty", "Tidak ada data."),
];
