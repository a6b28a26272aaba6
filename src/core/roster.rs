use crate::db::log::audit;
use crate::db::pool::DbPool;
use crate::db::queries::{
    find_group, insert_group, insert_student, load_groups, load_statuses, load_students_by_group,
};
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};
use crate::utils::table::Table;

/// Groups, students and statuses.
pub struct RosterLogic;

impl RosterLogic {
    pub fn add_group(pool: &mut DbPool, name: &str) -> AppResult<i64> {
        let id = insert_group(&pool.conn, name)?;
        audit(&pool.conn, "add", &format!("group {id}"), name.trim())?;
        success(format!("Added group '{}' with id {}.", name.trim(), id));
        Ok(id)
    }

    pub fn print_groups(pool: &mut DbPool, sep: &str) -> AppResult<()> {
        let groups = load_groups(&pool.conn)?;
        if groups.is_empty() {
            warning("No groups yet. Add one with `group --add <NAME>`.");
            return Ok(());
        }

        let mut table = Table::new(vec!["ID", "Group", "Students"]);
        for g in groups {
            let n = load_students_by_group(&pool.conn, g.id)?.len();
            table.add_row(vec![g.id.to_string(), g.name, n.to_string()]);
        }
        print!("{}", table.render(sep));
        Ok(())
    }

    pub fn add_student(
        pool: &mut DbPool,
        last_name: &str,
        first_name: &str,
        group_id: i64,
    ) -> AppResult<i64> {
        let group = find_group(&pool.conn, group_id)?;
        let id = insert_student(&pool.conn, last_name, first_name, group_id)?;
        audit(
            &pool.conn,
            "add",
            &format!("student {id}"),
            &format!("{} {} → {}", first_name.trim(), last_name.trim(), group.name),
        )?;
        success(format!(
            "Added {} {} to '{}' with id {}.",
            first_name.trim(),
            last_name.trim(),
            group.name,
            id
        ));
        Ok(id)
    }

    pub fn print_students(pool: &mut DbPool, group_id: i64, sep: &str) -> AppResult<()> {
        let group = find_group(&pool.conn, group_id)?;
        let students = load_students_by_group(&pool.conn, group_id)?;
        if students.is_empty() {
            warning(format!("Group '{}' has no students.", group.name));
            return Ok(());
        }

        let mut table = Table::new(vec!["ID", "Last name", "First name"]);
        for s in students {
            table.add_row(vec![s.id.to_string(), s.last_name, s.first_name]);
        }
        print!("{}", table.render(sep));
        Ok(())
    }

    pub fn print_statuses(pool: &mut DbPool, sep: &str) -> AppResult<()> {
        let mut table = Table::new(vec!["ID", "Status", "Code", "Absence reason"]);
        for st in load_statuses(&pool.conn)? {
            table.add_row(vec![
                st.id.to_string(),
                st.kind.label().to_string(),
                st.kind.initial().to_string(),
                if st.kind.is_absence() { "yes" } else { "no" }.to_string(),
            ]);
        }
        print!("{}", table.render(sep));
        Ok(())
    }
}
